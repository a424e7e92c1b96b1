use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::analysis::AnalysisRecord;
use crate::errors::AppError;
use crate::report::{render_report, REPORT_FILENAME};
use crate::state::AppState;

/// POST /download-report
///
/// Renders the posted record as a PDF attachment. The body is validated here;
/// the renderer assumes a valid record.
pub async fn handle_download_report(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRecord>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(record) =
        payload.map_err(|e| AppError::Validation(format!("Invalid report body: {}", e.body_text())))?;
    record.validate().map_err(AppError::Validation)?;

    let style = state.report_style.clone();
    let pdf = tokio::task::spawn_blocking(move || render_report(&record, &style))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;
    info!("Rendered report ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={REPORT_FILENAME}"),
            ),
        ],
        pdf,
    )
        .into_response())
}

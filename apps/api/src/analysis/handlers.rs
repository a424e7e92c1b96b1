use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::{analyze_resume, AnalysisRecord};
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentKind};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    kind: DocumentKind,
    bytes: Bytes,
}

/// POST /analyze-resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisRecord>, AppError> {
    let upload = read_upload(multipart).await?;
    info!(
        "Received {} ({:?}, {} bytes)",
        upload.filename,
        upload.kind,
        upload.bytes.len()
    );

    // CPU-bound; keep it off the async executor.
    let kind = upload.kind;
    let bytes = upload.bytes;
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

    let record = analyze_resume(&text, state.config.analysis_mode, state.llm.as_ref()).await?;
    Ok(Json(record))
}

/// Finds the `file` field and checks its type before reading the body.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let kind = DocumentKind::from_filename(&filename)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        return Ok(Upload {
            filename,
            kind,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Missing '{FILE_FIELD}' field in multipart body"
    )))
}

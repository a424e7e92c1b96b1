use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extraction::ExtractionError;
use crate::report::RenderError;

/// Message returned for any upload that is not a PDF or DOCX.
pub const UNSUPPORTED_FILE_MESSAGE: &str = "Only PDF or DOCX files supported";
/// Message returned when a document parses but holds no visible text.
pub const NO_TEXT_MESSAGE: &str = "Could not extract text";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("No extractable text")]
    NoExtractableText,

    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    #[error("Analysis timed out")]
    AnalysisTimeout,

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFileType(name) => AppError::UnsupportedFileType(name),
            ExtractionError::NoExtractableText => AppError::NoExtractableText,
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Timeout => AppError::AnalysisTimeout,
            AnalysisError::Unavailable(msg) => AppError::AnalysisUnavailable(msg),
            AnalysisError::MalformedOutput(e) => AppError::MalformedOutput(e.to_string()),
            AnalysisError::Schema(msg) => AppError::MalformedOutput(msg),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileType(name) => {
                tracing::info!("Rejected upload with unsupported type: {name}");
                (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_FILE_TYPE",
                    UNSUPPORTED_FILE_MESSAGE.to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    "The uploaded document could not be read".to_string(),
                )
            }
            AppError::NoExtractableText => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_EXTRACTABLE_TEXT",
                NO_TEXT_MESSAGE.to_string(),
            ),
            AppError::AnalysisUnavailable(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_UNAVAILABLE",
                    "Resume analysis is currently unavailable".to_string(),
                )
            }
            AppError::AnalysisTimeout => {
                tracing::error!("LLM call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "ANALYSIS_TIMEOUT",
                    "Resume analysis took too long to respond".to_string(),
                )
            }
            AppError::MalformedOutput(msg) => {
                tracing::error!("Malformed model output: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_MODEL_OUTPUT",
                    "The AI returned an analysis that could not be understood".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    "The report could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

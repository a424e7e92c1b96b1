pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_resume;
use crate::report::handlers::handle_download_report;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze-resume", post(handle_analyze_resume))
        .route("/download-report", post(handle_download_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

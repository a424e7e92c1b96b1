use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn home_handler() -> Json<Value> {
    Json(json!({ "message": "Resume AI Backend Running Successfully!" }))
}

/// GET /health
/// Returns a simple status object with service version and the active provider.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "provider": state.llm.name(),
        "analysisMode": state.config.analysis_mode.as_str()
    }))
}

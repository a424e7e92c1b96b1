use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;
use crate::report::ReportStyle;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    /// The configured vendor. Handlers never branch on which one it is.
    pub llm: Arc<dyn CompletionProvider>,
    pub config: Config,
    pub report_style: Arc<ReportStyle>,
}

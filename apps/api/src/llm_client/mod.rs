/// LLM Client — the single point of entry for all model API calls.
///
/// ARCHITECTURAL RULE: No other module may call a vendor API directly.
/// Callers hold an `Arc<dyn CompletionProvider>` and never branch on the vendor.
///
/// There is no retry loop: every call is bounded by the client timeout and a
/// failure is terminal for the request that made it.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::{Config, ProviderKind};

pub mod anthropic;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response is missing expected content: {0}")]
    MissingContent(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(err)
        }
    }
}

/// One completion call: a persona, an instruction, and whether the vendor
/// should be asked to constrain its output to a JSON object.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub json_output: bool,
}

/// A hosted text-generation service.
///
/// Carried in `AppState` as `Arc<dyn CompletionProvider>`; each vendor is one
/// implementation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short vendor name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Returns the generated text of a single completion.
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, LlmError>;
}

/// Builds the provider selected by configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn CompletionProvider>> {
    let http = build_http_client(config.llm_timeout)?;
    let provider: Arc<dyn CompletionProvider> = match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
            http,
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
        )),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
            http,
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
        )),
    };
    Ok(provider)
}

pub(crate) fn build_http_client(timeout: Duration) -> anyhow::Result<Client> {
    use anyhow::Context;

    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Reads a 2xx body and decodes it. Transport errors while reading (including
/// the client timeout) go through `From<reqwest::Error>`; only a body that
/// arrives whole but has the wrong shape is `MissingContent`.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LlmError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| LlmError::MissingContent(format!("unexpected response body: {e}")))
}

/// Reads a non-success response body, preferring the vendor's own error message.
pub(crate) async fn api_error(response: reqwest::Response) -> LlmError {
    #[derive(serde::Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

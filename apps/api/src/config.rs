use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::AnalysisMode;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://localhost:8080,https://resumexai.netlify.app";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Which hosted model vendor answers completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => bail!("LLM_PROVIDER must be 'openai' or 'anthropic', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if the credential for the selected provider is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderKind,
    pub llm_api_key: String,
    /// Overrides the vendor's API base URL (proxies, local stubs).
    pub llm_base_url: Option<String>,
    pub llm_timeout: Duration,
    pub analysis_mode: AnalysisMode,
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = ProviderKind::parse(
            &optional_env("LLM_PROVIDER").unwrap_or_else(|| "openai".to_string()),
        )?;
        let llm_api_key = match provider {
            ProviderKind::OpenAi => require_env("OPENAI_API_KEY")?,
            ProviderKind::Anthropic => require_env("ANTHROPIC_API_KEY")?,
        };

        let analysis_mode = optional_env("ANALYSIS_MODE")
            .map(|v| v.parse::<AnalysisMode>())
            .transpose()
            .context("ANALYSIS_MODE must be 'direct' or 'summarized'")?
            .unwrap_or_default();

        let llm_timeout_secs = optional_env("LLM_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        let max_upload_bytes = optional_env("MAX_UPLOAD_BYTES")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("MAX_UPLOAD_BYTES must be a byte count")?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Ok(Config {
            provider,
            llm_api_key,
            llm_base_url: optional_env("LLM_BASE_URL"),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            analysis_mode,
            allowed_origins: parse_origins(
                &optional_env("ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            max_upload_bytes,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

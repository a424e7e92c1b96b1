// Resume analysis: prompt construction, the completion call and
// schema-checked parsing of the model's JSON into an AnalysisRecord.

pub mod handlers;
pub mod prompts;
pub mod record;
pub mod requester;

use std::str::FromStr;

use thiserror::Error;

use crate::llm_client::LlmError;

pub use record::AnalysisRecord;
pub use requester::analyze_resume;

/// How the resume text reaches the analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// One call over the raw extracted text.
    #[default]
    Direct,
    /// Condense the resume first, then analyse the condensed points.
    Summarized,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Direct => "direct",
            AnalysisMode::Summarized => "summarized",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown analysis mode '{0}'")]
pub struct UnknownAnalysisMode(pub String);

impl FromStr for AnalysisMode {
    type Err = UnknownAnalysisMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(AnalysisMode::Direct),
            "summarized" | "summarised" => Ok(AnalysisMode::Summarized),
            other => Err(UnknownAnalysisMode(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis service unavailable: {0}")]
    Unavailable(String),

    #[error("analysis service timed out")]
    Timeout,

    #[error("model output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("model output failed schema validation: {0}")]
    Schema(String),
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => AnalysisError::Timeout,
            other => AnalysisError::Unavailable(other.to_string()),
        }
    }
}

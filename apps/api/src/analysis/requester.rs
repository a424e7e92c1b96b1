use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::prompts::{
    render, ANALYSIS_SYSTEM, RESUME_ANALYSIS_PROMPT, RESUME_SUMMARY_PROMPT, SUMMARY_SYSTEM,
};
use crate::analysis::record::{parse_model_output, AnalysisRecord};
use crate::analysis::{AnalysisError, AnalysisMode};
use crate::llm_client::{CompletionProvider, CompletionRequest};

/// Turns extracted resume text into a validated `AnalysisRecord`.
///
/// Pipeline:
/// 1. (summarized mode only) condense the resume with a free-text call
/// 2. analysis call with the JSON-output flag set
/// 3. strip fences, parse, schema-check and validate the reply
///
/// Nothing is retried. The raw reply is logged when it fails to parse and
/// never returned to the caller.
pub async fn analyze_resume(
    resume_text: &str,
    mode: AnalysisMode,
    llm: &dyn CompletionProvider,
) -> Result<AnalysisRecord, AnalysisError> {
    let span = info_span!(
        "analysis",
        analysis_id = %Uuid::new_v4(),
        provider = llm.name(),
        mode = mode.as_str(),
    );
    run_analysis(resume_text, mode, llm).instrument(span).await
}

async fn run_analysis(
    resume_text: &str,
    mode: AnalysisMode,
    llm: &dyn CompletionProvider,
) -> Result<AnalysisRecord, AnalysisError> {
    info!("Analyzing resume ({} chars)", resume_text.len());

    let analysed_text = match mode {
        AnalysisMode::Direct => resume_text.to_string(),
        AnalysisMode::Summarized => summarize(resume_text, llm).await?,
    };

    let prompt = render(RESUME_ANALYSIS_PROMPT, &analysed_text);
    let raw = llm
        .complete(&CompletionRequest {
            system: ANALYSIS_SYSTEM,
            prompt: &prompt,
            json_output: true,
        })
        .await?;

    match parse_model_output(&raw) {
        Ok(record) => {
            info!(
                "Analysis complete: score={} skills={}",
                record.score,
                record.skills.len()
            );
            Ok(record)
        }
        Err(e) => {
            warn!("Rejected model output ({e}): {raw}");
            Err(e)
        }
    }
}

async fn summarize(resume_text: &str, llm: &dyn CompletionProvider) -> Result<String, AnalysisError> {
    let prompt = render(RESUME_SUMMARY_PROMPT, resume_text);
    let summary = llm
        .complete(&CompletionRequest {
            system: SUMMARY_SYSTEM,
            prompt: &prompt,
            json_output: false,
        })
        .await?;

    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AnalysisError::Unavailable(
            "summarization returned no text".to_string(),
        ));
    }
    info!("Resume condensed to {} chars", summary.len());
    Ok(summary.to_string())
}

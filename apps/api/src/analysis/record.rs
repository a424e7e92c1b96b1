use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::AnalysisError;
use crate::llm_client::strip_json_fences;

pub const MAX_SCORE: u8 = 100;

/// The validated result of one resume evaluation.
///
/// Deserialization is strict: a missing required key or a mistyped field is
/// rejected, never coerced. `strengths` and `sections` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub score: u8,
    pub skills: Vec<String>,
    pub summary: String,
    #[serde(default = "no_entries")]
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub improved_resume: String,
    /// Free-form extra sections some models return. Carried through, never rendered.
    #[serde(default)]
    pub sections: Vec<Value>,
}

fn no_entries() -> Vec<String> {
    Vec::new()
}

impl AnalysisRecord {
    /// Checks the value invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.score > MAX_SCORE {
            return Err(format!("score {} is outside 0..={MAX_SCORE}", self.score));
        }
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        if self.improved_resume.trim().is_empty() {
            return Err("improvedResume is empty".to_string());
        }
        Ok(())
    }
}

/// Parses raw model text into a validated record.
///
/// Code fences are stripped first. Text that is not JSON at all is
/// `MalformedOutput`; JSON of the wrong shape or with out-of-range values is
/// `Schema`.
pub fn parse_model_output(raw: &str) -> Result<AnalysisRecord, AnalysisError> {
    let value: Value =
        serde_json::from_str(strip_json_fences(raw)).map_err(AnalysisError::MalformedOutput)?;
    let record: AnalysisRecord =
        serde_json::from_value(value).map_err(|e| AnalysisError::Schema(e.to_string()))?;
    record.validate().map_err(AnalysisError::Schema)?;
    Ok(record)
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub fn sample_record() -> AnalysisRecord {
        AnalysisRecord {
            score: 74,
            skills: ["Rust", "PostgreSQL", "Kubernetes", "gRPC"]
                .map(String::from)
                .to_vec(),
            summary: "Backend engineer with six years building payment and data platforms."
                .to_string(),
            strengths: vec![
                "Quantified impact on most bullets".to_string(),
                "Clear progression from engineer to tech lead".to_string(),
            ],
            weaknesses: vec![
                "Summary is generic and repeats the job title".to_string(),
                "Education section lacks dates".to_string(),
            ],
            suggestions: vec![
                "Lead each bullet with a strong action verb".to_string(),
                "Move certifications above education".to_string(),
            ],
            improved_resume: "Jordan Lee\nSenior Backend Engineer\n\nEXPERIENCE\n\
                              Acme Pay: Led migration of the ledger service to Rust, cutting p99 latency by 40%.\n\
                              Built reconciliation pipeline processing 2M transactions per day."
                .to_string(),
            sections: Vec::new(),
        }
    }

    fn sample_json() -> Value {
        json!({
            "score": 82,
            "skills": ["Python", "Go"],
            "summary": "Software engineer.",
            "strengths": ["Concise"],
            "weaknesses": [],
            "suggestions": ["Add metrics"],
            "improvedResume": "Jane Doe\nSoftware Engineer"
        })
    }

    #[test]
    fn test_parse_model_output_valid_record() {
        let record = parse_model_output(&sample_json().to_string()).unwrap();
        assert_eq!(record.score, 82);
        assert_eq!(record.skills, vec!["Python", "Go"]);
        assert_eq!(record.improved_resume, "Jane Doe\nSoftware Engineer");
        assert!(record.sections.is_empty());
    }

    #[test]
    fn test_parse_model_output_strips_code_fences() {
        let raw = format!("```json\n{}\n```", sample_json());
        assert_eq!(parse_model_output(&raw).unwrap().score, 82);
    }

    #[test]
    fn test_missing_strengths_defaults_to_empty() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("strengths");
        let record = parse_model_output(&value.to_string()).unwrap();
        assert!(record.strengths.is_empty());
    }

    #[test]
    fn test_sections_are_carried_through() {
        let mut value = sample_json();
        value["sections"] = json!([{"title": "Projects"}, "free text"]);
        let record = parse_model_output(&value.to_string()).unwrap();
        assert_eq!(record.sections.len(), 2);
    }

    #[test]
    fn test_not_json_is_malformed_output() {
        let err = parse_model_output("Sure! Here is your analysis: great resume").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedOutput(_)));
    }

    #[test]
    fn test_missing_required_key_is_schema_error() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("improvedResume");
        let err = parse_model_output(&value.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }

    #[test]
    fn test_mistyped_score_is_not_coerced() {
        let mut value = sample_json();
        value["score"] = json!("82");
        assert!(matches!(
            parse_model_output(&value.to_string()).unwrap_err(),
            AnalysisError::Schema(_)
        ));

        value["score"] = json!(82.5);
        assert!(matches!(
            parse_model_output(&value.to_string()).unwrap_err(),
            AnalysisError::Schema(_)
        ));
    }

    #[test]
    fn test_score_out_of_range_is_schema_error() {
        let mut value = sample_json();
        value["score"] = json!(101);
        let err = parse_model_output(&value.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(msg) if msg.contains("101")));

        value["score"] = json!(-1);
        assert!(matches!(
            parse_model_output(&value.to_string()).unwrap_err(),
            AnalysisError::Schema(_)
        ));
    }

    #[test]
    fn test_blank_summary_is_schema_error() {
        let mut value = sample_json();
        value["summary"] = json!("   ");
        assert!(matches!(
            parse_model_output(&value.to_string()).unwrap_err(),
            AnalysisError::Schema(_)
        ));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert!(value.get("improvedResume").is_some());
        assert!(value.get("improved_resume").is_none());
    }
}

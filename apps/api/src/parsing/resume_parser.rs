//! Resume parse step: one oracle call turns raw resume text into `ResumeFields`
//! plus six section scores.
//!
//! Section scores are clamped to their maxima and the total is recomputed from
//! them. The oracle's own `Total Score` is kept for display only.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::models::ResumeFields;
use crate::oracle::{GenerationConfig, Oracle};
use crate::parsing::prompts::build_parse_prompt;
use crate::parsing::sections::MiscSection;
use crate::scoring::normalize::{clamp, score_from_value};
use crate::scoring::recovery::recover_json;
use crate::scoring::EvaluationError;

const TOTAL_CAP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub score: u32,
    pub max: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResume {
    pub fields: ResumeFields,
    pub sections: BTreeMap<MiscSection, SectionScore>,
    /// Sum of section scores, capped at 100.
    pub total: u32,
    /// What the oracle reported as its total, if it reported a number.
    pub oracle_total: Option<u32>,
}

impl ParsedResume {
    pub fn section(&self, section: MiscSection) -> Option<&SectionScore> {
        self.sections.get(&section)
    }

    /// Grammar and Language rescaled onto 0–100.
    pub fn grammar_percent(&self) -> f64 {
        self.section(MiscSection::GrammarAndLanguage)
            .map(|s| f64::from(s.score) * 100.0 / f64::from(s.max))
            .unwrap_or(0.0)
    }
}

pub async fn parse_resume(
    oracle: &dyn Oracle,
    resume_text: &str,
) -> Result<ParsedResume, EvaluationError> {
    if resume_text.trim().is_empty() {
        return Err(EvaluationError::prompt("resume text is empty"));
    }

    let prompt = build_parse_prompt(resume_text);
    info!(chars = resume_text.len(), "Requesting resume parse");
    let raw = oracle
        .complete(&prompt, &GenerationConfig::deterministic())
        .await?;

    let parsed = interpret_parse(&raw)?;
    info!(total = parsed.total, "Resume parsed");
    Ok(parsed)
}

/// Turns a raw parse response into a `ParsedResume`. Pure.
pub fn interpret_parse(raw: &str) -> Result<ParsedResume, EvaluationError> {
    let recovered = recover_json(raw)?;

    let extracted = match recovered.get("Extracted Data") {
        Some(value @ Value::Object(_)) => value.clone(),
        _ => return Err(EvaluationError::validation("Extracted Data")),
    };
    let fields: ResumeFields = serde_json::from_value(extracted)
        .map_err(|e| EvaluationError::validation(format!("Extracted Data: {e}")))?;

    let misc = recovered
        .get("Miscellaneous Score")
        .and_then(Value::as_object)
        .ok_or_else(|| EvaluationError::validation("Miscellaneous Score"))?;

    let mut sections = BTreeMap::new();
    for section in MiscSection::ALL {
        sections.insert(section, read_section(misc, section)?);
    }

    let total = sections
        .values()
        .map(|s| s.score)
        .sum::<u32>()
        .min(TOTAL_CAP);

    let oracle_total = recovered
        .get("Total Score")
        .and_then(Value::as_f64)
        .map(|t| clamp(t.floor(), 0.0, f64::from(TOTAL_CAP)) as u32);
    match oracle_total {
        Some(reported) if reported != total => warn!(
            oracle_total = reported,
            total, "Oracle Total Score disagrees with section sum; using section sum"
        ),
        None => warn!(total, "Oracle gave no numeric Total Score; using section sum"),
        _ => {}
    }

    Ok(ParsedResume {
        fields,
        sections,
        total,
        oracle_total,
    })
}

/// Reads `{ "score": n, "feedback": "..." }` or a bare number, floored and clamped.
fn read_section(
    misc: &Map<String, Value>,
    section: MiscSection,
) -> Result<SectionScore, EvaluationError> {
    let entry = misc
        .get(section.key())
        .ok_or_else(|| EvaluationError::validation(section.key()))?;

    let (score_value, feedback) = match entry {
        Value::Object(fields) => {
            let score = fields
                .get("score")
                .ok_or_else(|| EvaluationError::validation(format!("{section}.score")))?;
            let feedback = fields
                .get("feedback")
                .and_then(Value::as_str)
                .unwrap_or_default();
            (score, feedback)
        }
        other => (other, ""),
    };

    let score = score_from_value(score_value)
        .map_err(|e| EvaluationError::validation(format!("{section}.score: {e}")))?;
    let max = section.max_points();
    let score = clamp(score.floor(), 0.0, f64::from(max)) as u32;

    Ok(SectionScore {
        score,
        max,
        feedback: feedback.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;
    use crate::scoring::Stage;
    use serde_json::json;

    fn parse_value() -> Value {
        json!({
            "Extracted Data": {
                "Contact Information": {"name": "Jane Doe", "email": "jane@example.com"},
                "Skills": {"Languages": ["Rust"], "Technologies": [], "Core": []},
                "Work Experience": []
            },
            "Miscellaneous Score": {
                "Section Headings": {"score": 12, "feedback": "One non-standard header"},
                "ATS Parse Rate": {"score": 25, "feedback": "Clean"},
                "Repetition": {"score": 8, "feedback": "led x2"},
                "Grammar and Language": {"score": 12, "feedback": "Two typos"},
                "Buzzwords": {"score": 20, "feedback": "None"},
                "Active Voice": {"score": 15, "feedback": "All active"}
            },
            "Total Score": 92
        })
    }

    #[test]
    fn test_well_formed_parse() {
        let parsed = interpret_parse(&parse_value().to_string()).unwrap();
        assert_eq!(parsed.fields.contact.name.as_deref(), Some("Jane Doe"));
        assert_eq!(parsed.total, 92);
        assert_eq!(parsed.oracle_total, Some(92));
        assert_eq!(parsed.section(MiscSection::Repetition).unwrap().feedback, "led x2");
        assert!((parsed.grammar_percent() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_is_recomputed_not_trusted() {
        let mut value = parse_value();
        value["Total Score"] = json!(40);
        let parsed = interpret_parse(&value.to_string()).unwrap();
        assert_eq!(parsed.total, 92);
        assert_eq!(parsed.oracle_total, Some(40));
    }

    #[test]
    fn test_null_total_is_kept_as_none() {
        let mut value = parse_value();
        value["Total Score"] = Value::Null;
        let parsed = interpret_parse(&value.to_string()).unwrap();
        assert_eq!(parsed.total, 92);
        assert_eq!(parsed.oracle_total, None);
    }

    #[test]
    fn test_section_scores_clamped_to_their_maxima() {
        let mut value = parse_value();
        value["Miscellaneous Score"]["Repetition"]["score"] = json!(40);
        value["Miscellaneous Score"]["Buzzwords"]["score"] = json!(-5);
        value["Miscellaneous Score"]["Active Voice"] = json!(13.9);
        let parsed = interpret_parse(&value.to_string()).unwrap();
        assert_eq!(parsed.section(MiscSection::Repetition).unwrap().score, 10);
        assert_eq!(parsed.section(MiscSection::Buzzwords).unwrap().score, 0);
        assert_eq!(parsed.section(MiscSection::ActiveVoice).unwrap().score, 13);
        assert_eq!(parsed.total, 12 + 25 + 10 + 12 + 0 + 13);
    }

    #[test]
    fn test_missing_section_is_validation_failure() {
        let mut value = parse_value();
        value["Miscellaneous Score"]
            .as_object_mut()
            .unwrap()
            .remove("Buzzwords");
        let err = interpret_parse(&value.to_string()).unwrap_err();
        assert_eq!(err.stage(), Stage::Validation);
        assert!(err.to_string().contains("Buzzwords"));
    }

    #[test]
    fn test_missing_extracted_data_is_validation_failure() {
        let mut value = parse_value();
        value.as_object_mut().unwrap().remove("Extracted Data");
        let err = interpret_parse(&value.to_string()).unwrap_err();
        assert_eq!(err.stage(), Stage::Validation);
        assert!(err.to_string().contains("Extracted Data"));
    }

    #[test]
    fn test_fenced_response_is_recovered() {
        let raw = format!("```json\n{}\n```", parse_value());
        assert_eq!(interpret_parse(&raw).unwrap().total, 92);
    }

    #[test]
    fn test_garbage_fails_at_recovery() {
        let err = interpret_parse("I could not read this resume.").unwrap_err();
        assert_eq!(err.stage(), Stage::Recovery);
    }

    #[tokio::test]
    async fn test_parse_resume_calls_oracle_once() {
        let body = parse_value().to_string();
        let oracle = ScriptedOracle::replying(&[body.as_str()]);
        let parsed = parse_resume(&oracle, "Jane Doe\nRust").await.unwrap();
        assert_eq!(parsed.total, 92);
        assert_eq!(oracle.call_count(), 1);
        let prompts = oracle.prompts.lock().unwrap();
        assert!(prompts[0].contains("Jane Doe\nRust"));
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_oracle() {
        let oracle = ScriptedOracle::replying(&[]);
        let err = parse_resume(&oracle, "   \n").await.unwrap_err();
        assert_eq!(err.stage(), Stage::Prompt);
        assert_eq!(oracle.call_count(), 0);
    }
}

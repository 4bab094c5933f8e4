//! End-to-end scoring of one uploaded resume.
//!
//! analyze (format score) → parse (fields + grammar) → rubric evaluation
//! → optional job match. Each oracle step fails the whole report; there are
//! no partial reports.

pub mod handlers;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::document::{AnalyzedDocument, FormatReport};
use crate::matching::{match_job_description, MatchScore};
use crate::oracle::Oracle;
use crate::parsing::{parse_resume, ParsedResume};
use crate::scoring::{evaluate, EvaluationError, EvaluationResult, RubricVariant};

#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub format: FormatReport,
    pub parsed: ParsedResume,
    pub evaluation: EvaluationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_match: Option<MatchScore>,
}

impl AtsReport {
    /// The authoritative ATS score.
    pub fn ats_score(&self) -> u32 {
        self.evaluation.weighted_total()
    }
}

pub async fn score_document(
    oracle: &dyn Oracle,
    document: AnalyzedDocument,
    job_description: Option<&str>,
    variant: RubricVariant,
) -> Result<AtsReport, EvaluationError> {
    let report_id = Uuid::new_v4();
    info!(%report_id, rubric = %variant, "Scoring document");

    let parsed = parse_resume(oracle, &document.text).await?;

    let format_score = f64::from(document.format.total);
    let grammatical_score = parsed.grammar_percent();
    let evaluation = evaluate(
        oracle,
        &parsed.fields,
        format_score,
        grammatical_score,
        variant,
    )
    .await?;

    let job_match = match job_description.map(str::trim).filter(|jd| !jd.is_empty()) {
        Some(jd) => Some(match_job_description(oracle, &parsed.fields, jd).await?),
        None => None,
    };

    let report = AtsReport {
        report_id,
        generated_at: Utc::now(),
        format: document.format,
        parsed,
        evaluation,
        job_match,
    };
    info!(
        %report_id,
        ats_score = report.ats_score(),
        match_score = report.job_match.map(|m| m.match_score),
        "Document scored"
    );

    Ok(report)
}

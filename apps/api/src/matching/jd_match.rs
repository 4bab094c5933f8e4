use serde::Serialize;
use tracing::info;

use crate::matching::extractor::extract_score;
use crate::matching::prompts::build_match_prompt;
use crate::oracle::{GenerationConfig, Oracle};
use crate::scoring::EvaluationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub match_score: u32,
}

/// Scores a resume against a job description with one greedy oracle call.
///
/// A reply without digits scores 0. An oracle that cannot be reached is an
/// error, never a 0.
pub async fn match_job_description<F>(
    oracle: &dyn Oracle,
    resume_fields: &F,
    job_description: &str,
) -> Result<MatchScore, EvaluationError>
where
    F: Serialize + ?Sized,
{
    if job_description.trim().is_empty() {
        return Err(EvaluationError::prompt("job description is empty"));
    }
    let fields_json = serde_json::to_string_pretty(resume_fields)
        .map_err(|e| EvaluationError::prompt(format!("resume fields are not serializable: {e}")))?;

    let prompt = build_match_prompt(job_description.trim(), &fields_json);
    let raw = oracle.complete(&prompt, &GenerationConfig::greedy()).await?;

    let match_score = extract_score(&raw);
    info!(match_score, "Job match scored");
    Ok(MatchScore { match_score })
}

//! Axum route handlers for job-description matching.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::{
    extract_jd_skills, match_job_description, skill_coverage, JdSkill, MatchScore,
    SkillCoverage,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_fields: Value,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub job_description: String,
    #[serde(default)]
    pub resume_skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<JdSkill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<SkillCoverage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Recruiter-style 0–100 score of structured resume fields against a JD.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchScore>, AppError> {
    if !request.resume_fields.is_object() {
        return Err(AppError::Validation(
            "resume_fields must be a JSON object".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let score = match_job_description(
        state.oracle.as_ref(),
        &request.resume_fields,
        &request.job_description,
    )
    .await?;

    Ok(Json(score))
}

/// POST /api/v1/match/skills
///
/// Extracts weighted JD skills; with `resume_skills`, also reports coverage.
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(request): Json<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let skills = extract_jd_skills(state.oracle.as_ref(), &request.job_description).await?;
    let coverage = request.resume_skills.as_ref().map(|held| {
        skill_coverage(
            &skills,
            held.iter().map(String::as_str),
            state.synonyms.as_ref(),
        )
    });

    Ok(Json(SkillsResponse { skills, coverage }))
}

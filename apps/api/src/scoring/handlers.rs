//! Axum route handler for rubric evaluation of already-structured resume fields.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::scoring::{evaluate, EvaluationResult, RubricVariant};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_fields: Value,
    pub format_score: f64,
    pub grammatical_score: f64,
    /// Falls back to the configured default rubric.
    #[serde(default)]
    pub variant: Option<RubricVariant>,
}

/// POST /api/v1/ats/evaluate
///
/// Evaluates resume fields against the rubric. The returned `weighted_total` is
/// always recomputed locally from the clamped sub-scores.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    if !request.resume_fields.is_object() {
        return Err(AppError::Validation(
            "resume_fields must be a JSON object".to_string(),
        ));
    }

    let variant = request.variant.unwrap_or(state.config.rubric);
    let result = evaluate(
        state.oracle.as_ref(),
        &request.resume_fields,
        request.format_score,
        request.grammatical_score,
        variant,
    )
    .await?;

    Ok(Json(result))
}

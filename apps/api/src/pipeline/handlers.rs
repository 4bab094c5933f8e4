//! Axum route handler for the full scoring pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::document::extract_document;
use crate::document::handlers::Upload;
use crate::errors::AppError;
use crate::pipeline::{score_document, AtsReport};
use crate::scoring::RubricVariant;
use crate::state::AppState;

/// POST /api/v1/ats/score
///
/// Multipart: `file` (PDF, required), `job_description` and `variant` (optional).
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AtsReport>, AppError> {
    let mut upload = Upload::read(multipart).await?;
    let file = upload.require_file()?;

    let variant = match upload.field("variant") {
        Some(raw) => raw.parse::<RubricVariant>().map_err(AppError::Validation)?,
        None => state.config.rubric,
    };

    let document = extract_document(file, &state.config.analyzer).await?;
    let report = score_document(
        state.oracle.as_ref(),
        document,
        upload.field("job_description"),
        variant,
    )
    .await?;

    Ok(Json(report))
}

pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::document::handlers as document;
use crate::matching::handlers as matching;
use crate::pipeline::handlers as pipeline;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Uploaded resumes are small, but axum's 2 MiB default rejects scanned PDFs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // ATS scoring
        .route("/api/v1/ats/analyze", post(document::handle_analyze))
        .route("/api/v1/ats/evaluate", post(scoring::handle_evaluate))
        .route("/api/v1/ats/score", post(pipeline::handle_score))
        // Job-description matching
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/skills", post(matching::handle_skills))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

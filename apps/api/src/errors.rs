use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::document::DocumentError;
use crate::scoring::{EvaluationError, Stage};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document error: {0}")]
    Document(DocumentError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            // A panicked or cancelled analysis task says nothing about the upload.
            DocumentError::Task(_) => AppError::Internal(err.into()),
            other => AppError::Document(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut stage = None;
        let mut raw_response = None;

        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_DOCUMENT",
                e.to_string(),
            ),
            AppError::Evaluation(e) => {
                stage = Some(e.stage());
                raw_response = e.raw_response().map(str::to_string);
                match e.stage() {
                    Stage::Prompt => (StatusCode::BAD_REQUEST, "INVALID_INPUT", e.to_string()),
                    Stage::Oracle => {
                        tracing::error!("Oracle error: {e}");
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "ORACLE_UNAVAILABLE",
                            "The scoring service is temporarily unavailable".to_string(),
                        )
                    }
                    Stage::Recovery => {
                        tracing::error!("Unrecoverable oracle response: {e}");
                        (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", e.to_string())
                    }
                    Stage::Validation => {
                        tracing::error!("Invalid oracle response: {e}");
                        (StatusCode::BAD_GATEWAY, "INVALID_ORACLE_RESPONSE", e.to_string())
                    }
                }
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = Map::new();
        error.insert("code".to_string(), json!(code));
        error.insert("message".to_string(), json!(message));
        if let Some(stage) = stage {
            error.insert("stage".to_string(), json!(stage));
        }
        if let Some(raw) = raw_response {
            error.insert("raw_response".to_string(), Value::String(raw));
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

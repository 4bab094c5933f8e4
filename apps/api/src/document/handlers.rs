//! Axum route handlers for document analysis.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::document::{extract_document, FormatReport};
use crate::errors::AppError;
use crate::state::AppState;

/// A multipart upload: the `file` part plus any text fields sent alongside it.
#[derive(Debug, Default)]
pub struct Upload {
    pub file: Option<Bytes>,
    pub file_name: Option<String>,
    pub fields: HashMap<String, String>,
}

impl Upload {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = Upload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "file" {
                upload.file_name = field.file_name().map(str::to_string);
                upload.file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("could not read uploaded file: {e}"))
                })?);
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read field '{name}': {e}"))
                })?;
                upload.fields.insert(name, value);
            }
        }

        Ok(upload)
    }

    pub fn require_file(&mut self) -> Result<Bytes, AppError> {
        match self.file.take() {
            Some(file) if !file.is_empty() => Ok(file),
            _ => Err(AppError::Validation("a non-empty 'file' part is required".to_string())),
        }
    }

    /// A text field, `None` when absent or blank.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// POST /api/v1/ats/analyze
///
/// Scores the uploaded PDF's format (fonts, bullet length, word count).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FormatReport>, AppError> {
    let mut upload = Upload::read(multipart).await?;
    let file = upload.require_file()?;

    let document = extract_document(file, &state.config.analyzer).await?;
    info!(
        file = upload.file_name.as_deref().unwrap_or("<unnamed>"),
        total = document.format.total,
        "Document format scored"
    );

    Ok(Json(document.format))
}

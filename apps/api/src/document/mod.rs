// Document analysis: text and font extraction from an uploaded PDF plus the
// deterministic format score. No oracle involvement.

pub mod analyzer;
pub mod handlers;
pub mod pdf;

use thiserror::Error;

pub use analyzer::{AnalyzerConfig, FormatReport};
pub use pdf::{extract_document, AnalyzedDocument};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is empty")]
    Empty,

    #[error("document could not be read as PDF: {0}")]
    Unreadable(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("document analysis task failed: {0}")]
    Task(String),
}

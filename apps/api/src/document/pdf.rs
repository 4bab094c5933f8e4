use std::collections::BTreeSet;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, warn};

use crate::document::analyzer::{
    collect_stats, score_format, strip_subset_prefix, AnalyzerConfig, FormatReport,
};
use crate::document::DocumentError;

/// An uploaded resume after text extraction and format scoring.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedDocument {
    #[serde(skip)]
    pub text: String,
    pub format: FormatReport,
}

/// Extracts text and fonts from a PDF and scores its format.
///
/// PDF parsing is CPU-bound and synchronous, so it runs on the blocking pool.
pub async fn extract_document(
    bytes: Bytes,
    config: &AnalyzerConfig,
) -> Result<AnalyzedDocument, DocumentError> {
    let config = config.clone();
    tokio::task::spawn_blocking(move || analyze_pdf(&bytes, &config))
        .await
        .map_err(|e| DocumentError::Task(e.to_string()))?
}

pub fn analyze_pdf(bytes: &[u8], config: &AnalyzerConfig) -> Result<AnalyzedDocument, DocumentError> {
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::Unreadable(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(DocumentError::NoText);
    }

    let fonts = match font_names(bytes) {
        Ok(fonts) => fonts,
        Err(e) => {
            warn!("Font enumeration failed, scoring without fonts: {e}");
            BTreeSet::new()
        }
    };
    debug!(fonts = ?fonts, "Fonts found in document");

    Ok(analyze_text(text, fonts, config))
}

/// Scores already-extracted text. Used directly when no PDF is involved.
pub fn analyze_text(text: String, fonts: BTreeSet<String>, config: &AnalyzerConfig) -> AnalyzedDocument {
    let stats = collect_stats(&text, fonts, config.bullet_word_threshold);
    let format = score_format(&stats, config);
    AnalyzedDocument { text, format }
}

/// Base font names from every page's font resources, subset tags removed.
fn font_names(bytes: &[u8]) -> Result<BTreeSet<String>, lopdf::Error> {
    let doc = lopdf::Document::load_mem(bytes)?;
    let mut names = BTreeSet::new();

    for page_id in doc.get_pages().into_values() {
        for font in doc.get_page_fonts(page_id).into_values() {
            if let Ok(name) = font.get(b"BaseFont").and_then(|o| o.as_name()) {
                let name = String::from_utf8_lossy(name);
                names.insert(strip_subset_prefix(&name).to_string());
            }
        }
    }

    Ok(names)
}

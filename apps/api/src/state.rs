use std::sync::Arc;

use crate::config::Config;
use crate::matching::SynonymLookup;
use crate::oracle::Oracle;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Every generative call goes through this. Default: `GeminiClient`.
    pub oracle: Arc<dyn Oracle>,
    pub config: Config,
    /// Pluggable synonym source for skill coverage. Default: `StaticThesaurus`.
    pub synonyms: Arc<dyn SynonymLookup>,
}

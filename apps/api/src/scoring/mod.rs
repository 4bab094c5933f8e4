// Deterministic post-processing of oracle output: recover the JSON, clamp the
// sub-scores, recompute the composite. The oracle's arithmetic is never trusted.

pub mod composite;
pub mod error;
pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod reconciler;
pub mod recovery;
pub mod rubric;

pub use error::{EvaluationError, Stage};
pub use reconciler::{evaluate, EvaluationResult};
pub use rubric::RubricVariant;

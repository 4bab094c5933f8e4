//! Weighted composite scorer. The rubric total is computed here and nowhere else.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::scoring::normalize::{clamp, clamp_score};
use crate::scoring::rubric::Category;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositeError {
    #[error("missing sub-score: {0}")]
    MissingField(Category),
}

/// Weights trusted verbatim. Not renormalized: a table summing above 1.0 is
/// legal and is held in range by the final clamp in [`composite`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTable {
    entries: Vec<(Category, f64)>,
}

impl WeightTable {
    pub fn new(entries: Vec<(Category, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(Category, f64)] {
        &self.entries
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// `round_half_up(Σ clamp(score) × weight)`, clamped to [0, 100].
///
/// Every weight-table entry needs a sub-score; extra sub-scores are ignored.
/// Deterministic: the same inputs always produce the same integer.
pub fn composite(
    subscores: &BTreeMap<Category, f64>,
    weights: &WeightTable,
) -> Result<u32, CompositeError> {
    let mut sum = 0.0_f64;
    for &(category, weight) in weights.entries() {
        let score = subscores
            .get(&category)
            .copied()
            .ok_or(CompositeError::MissingField(category))?;
        sum += clamp_score(score) * weight;
    }

    let rounded = round_half_up(sum);
    Ok(clamp(rounded, 0.0, 100.0) as u32)
}

/// Rounds .5 upward. Float noise below 1e-9 is snapped away first so that a sum
/// like 80.49999999999999 (mathematically 80.5) rounds to 81.
pub fn round_half_up(value: f64) -> f64 {
    let snapped = (value * 1e9).round() / 1e9;
    (snapped + 0.5).floor()
}

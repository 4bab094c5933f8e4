//! Bounded-value normalization. Out-of-range scores are corrected, never rejected.

use serde_json::Value;
use thiserror::Error;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("expected a number, found {found}")]
    NotNumeric { found: &'static str },
}

/// Clamps `value` into `[low, high]`. Idempotent.
pub fn clamp<T: PartialOrd>(value: T, low: T, high: T) -> T {
    debug_assert!(low <= high, "clamp called with low > high");
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Clamps into the score domain [0, 100]. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    clamp(value, SCORE_MIN, SCORE_MAX)
}

/// Reads a JSON number. Anything else is a typed failure, not a silent zero.
pub fn score_from_value(value: &Value) -> Result<f64, NormalizeError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(NormalizeError::NotNumeric { found: "number" }),
        other => Err(NormalizeError::NotNumeric {
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

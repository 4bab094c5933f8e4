use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::oracle::OracleError;
use crate::scoring::recovery::RecoveryError;

/// Where an oracle-backed evaluation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prompt,
    Oracle,
    Recovery,
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Prompt => "prompt",
            Stage::Oracle => "oracle",
            Stage::Recovery => "recovery",
            Stage::Validation => "validation",
        })
    }
}

/// Failure of any oracle-backed step (rubric evaluation, resume parse, JD skill
/// extraction, job match). Never carries a partial result.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("oracle unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),

    #[error("evaluation failed at {stage} stage: {detail}")]
    Failed {
        stage: Stage,
        detail: String,
        /// Raw oracle text, attached when recovery failed.
        raw_response: Option<String>,
    },
}

impl EvaluationError {
    pub fn prompt(detail: impl Into<String>) -> Self {
        EvaluationError::Failed {
            stage: Stage::Prompt,
            detail: detail.into(),
            raw_response: None,
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        EvaluationError::Failed {
            stage: Stage::Validation,
            detail: detail.into(),
            raw_response: None,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            EvaluationError::OracleUnavailable(_) => Stage::Oracle,
            EvaluationError::Failed { stage, .. } => *stage,
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            EvaluationError::Failed { raw_response, .. } => raw_response.as_deref(),
            EvaluationError::OracleUnavailable(_) => None,
        }
    }
}

impl From<RecoveryError> for EvaluationError {
    fn from(err: RecoveryError) -> Self {
        let raw = err.raw().to_string();
        EvaluationError::Failed {
            stage: Stage::Recovery,
            detail: err.to_string(),
            raw_response: Some(raw),
        }
    }
}

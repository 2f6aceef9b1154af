use thiserror::Error;

use crate::ValidationReport;

/// Field-level rejection of a form. Recoverable; the UI shows the messages
/// next to the offending inputs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid form: {}", summarize(.report))]
pub struct ValidationError {
    pub report: ValidationReport,
}

fn summarize(report: &ValidationReport) -> String {
    report
        .errors
        .values()
        .cloned()
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A predictor precondition failed even though the input reached it.
    #[error("{0}")]
    Computation(String),
}

impl PredictionError {
    pub fn computation(message: impl Into<String>) -> Self {
        PredictionError::Computation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PredictionError::Validation(_))
    }
}

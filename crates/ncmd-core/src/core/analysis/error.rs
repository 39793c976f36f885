use thiserror::Error;

/// Failures of the cluster-statistics pipeline.
///
/// `InvalidInput` means there was nothing meaningful to compute; `DivideByZero` means the
/// computation ran but its normalization is undefined.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot normalize distribution: all aggregated counts are zero")]
    DivideByZero,
}

impl AnalysisError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(message.into())
    }
}

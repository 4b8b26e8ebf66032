//! Error taxonomy for the sandbox entry points.
//!
//! Parameter and data-sufficiency problems are rejected here, before any
//! iteration begins. Numeric-degenerate inputs (e.g. a zero-width bounding
//! box) are not errors: the algorithms absorb them and note the condition in
//! the result's log trace.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The input set is empty or otherwise too small for the requested
    /// operation.
    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    /// A hyperparameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ModelError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for the sandbox entry points.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::invalid("k", "must be at least 1, got 0");
        assert_eq!(err.to_string(), "invalid parameter `k`: must be at least 1, got 0");

        let err = ModelError::InsufficientData("no training points supplied".to_string());
        assert!(err.to_string().contains("no training points"));
    }
}

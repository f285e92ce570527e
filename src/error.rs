//! Error types shared by the preprocessing pipeline and the attribution engine.
//!
//! Every fallible library operation returns [`OncoError`]. Errors are raised at
//! the boundary of the operation that detects the problem, so no partially
//! built split or summary ever escapes.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors produced by `oncolens` operations.
#[derive(Debug, Error)]
pub enum OncoError {
    /// The source file could not be read or is not parseable as a table.
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying failure description
        message: String,
    },

    /// Caller-supplied input violates a schema or parameter constraint.
    ///
    /// Covers a missing target column, an empty dataset after cleaning,
    /// attribution/feature shape mismatches, out-of-range parameters and
    /// degenerate stratification.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl OncoError {
    pub(crate) fn io(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        OncoError::Io {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        OncoError::Validation(message.into())
    }

    /// True for [`OncoError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, OncoError::Validation(_))
    }

    /// True for [`OncoError::Io`].
    pub fn is_io(&self) -> bool {
        matches!(self, OncoError::Io { .. })
    }
}

// Once a frame is in memory, polars failures come from its shape or dtypes.
impl From<PolarsError> for OncoError {
    fn from(err: PolarsError) -> Self {
        OncoError::Validation(err.to_string())
    }
}

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, OncoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = OncoError::io("/data/missing.csv", "file not found");
        assert_eq!(
            err.to_string(),
            "I/O error for '/data/missing.csv': file not found"
        );
        assert!(err.is_io());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_error_display() {
        let err = OncoError::validation("top_n must be at least 1");
        assert_eq!(err.to_string(), "Validation error: top_n must be at least 1");
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_polars_error_is_validation() {
        let err: OncoError = PolarsError::ColumnNotFound("radius_mean".into()).into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("radius_mean"));
    }
}

//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building dates and price series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Dates in a series are not strictly increasing.
    #[error("Series not ordered: {current} does not follow {previous}")]
    UnorderedSeries {
        /// The earlier date in the series.
        previous: String,
        /// The date that fails to advance past `previous`.
        current: String,
    },

    /// A price is NaN or infinite.
    #[error("Invalid price on {date}: {value}")]
    InvalidPrice {
        /// Date of the offending observation.
        date: String,
        /// The offending value.
        value: f64,
    },

    /// Parallel columns have different lengths.
    #[error("Column length mismatch: {column} has {actual} rows, expected {expected}")]
    LengthMismatch {
        /// Name of the mismatched column.
        column: String,
        /// Length of the date index.
        expected: usize,
        /// Length of the column.
        actual: usize,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(column: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = CoreError::length_mismatch("high", 10, 9);
        assert_eq!(
            err.to_string(),
            "Column length mismatch: high has 9 rows, expected 10"
        );
    }
}

//! Error types for risk calculations.

use thiserror::Error;
use varscope_core::CoreError;
use varscope_math::MathError;

/// Errors that can occur during risk calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Series too short for the requested horizon or window
    #[error("insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        /// What was being built
        context: String,
        /// Minimum observations required
        required: usize,
        /// Observations available
        actual: usize,
    },

    /// Calculation failed
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl RiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }
}

impl From<MathError> for RiskError {
    fn from(e: MathError) -> Self {
        match e {
            MathError::InsufficientData { required, actual } => {
                RiskError::insufficient_data("statistic", required, actual)
            }
            MathError::InvalidInput { reason } => RiskError::InvalidInput(reason),
            other => RiskError::CalculationFailed(other.to_string()),
        }
    }
}

impl From<CoreError> for RiskError {
    fn from(e: CoreError) -> Self {
        RiskError::InvalidInput(e.to_string())
    }
}

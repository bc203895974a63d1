//! Engine error types.

use thiserror::Error;

use varscope_risk::RiskError;
use varscope_traits::TraitError;

/// Engine error type.
///
/// Every variant is terminal for the run that raised it only; the session
/// keeps whatever result it held before.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Request parameters violate their limits; nothing was fetched
    #[error("validation error: {0}")]
    Validation(String),

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

    /// Required price column absent from the fetched data
    #[error("missing field: {0}")]
    MissingField(String),

    /// Fetch failed or returned no rows
    #[error("data source error: {0}")]
    DataSource(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Calculation error
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        EngineError::Config(message.into())
    }

    /// Returns true for errors raised before any data was fetched.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

impl From<RiskError> for EngineError {
    fn from(e: RiskError) -> Self {
        match e {
            RiskError::InsufficientData {
                context,
                required,
                actual,
            } => EngineError::InsufficientData {
                context,
                required,
                actual,
            },
            RiskError::InvalidInput(msg) | RiskError::CalculationFailed(msg) => {
                EngineError::Calculation(msg)
            }
        }
    }
}

impl From<TraitError> for EngineError {
    fn from(e: TraitError) -> Self {
        match e {
            TraitError::MissingColumn(column) => EngineError::MissingField(column.to_string()),
            other => EngineError::DataSource(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::Config(e.to_string())
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use varscope_traits::PriceColumn;

    #[test]
    fn test_missing_column_maps_to_missing_field() {
        let err: EngineError = TraitError::MissingColumn(PriceColumn::High).into();
        assert_eq!(err, EngineError::MissingField("high".into()));
    }

    #[test]
    fn test_source_failures_map_to_data_source() {
        let err: EngineError = TraitError::ConnectionFailed("timeout".into()).into();
        assert!(matches!(err, EngineError::DataSource(_)));
    }

    #[test]
    fn test_insufficient_data_keeps_counts() {
        let err: EngineError = RiskError::insufficient_data("5-day returns", 6, 3).into();
        assert_eq!(
            err.to_string(),
            "insufficient data for 5-day returns: need at least 6, got 3"
        );
    }
}

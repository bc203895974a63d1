//! Error types for data source operations.

use thiserror::Error;

use crate::market_data::PriceColumn;

/// Common error type for data source operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A column required by the caller is absent from the frame
    #[error("missing column: {0}")]
    MissingColumn(PriceColumn),

    /// Rate limited
    #[error("rate limited")]
    RateLimited,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<varscope_core::CoreError> for TraitError {
    fn from(e: varscope_core::CoreError) -> Self {
        TraitError::ParseError(e.to_string())
    }
}

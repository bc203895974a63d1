//! # Varscope Traits
//!
//! Trait definitions for the collaborators of the Varscope risk engine.
//!
//! This crate contains ONLY trait definitions and the data shapes that cross
//! them. Implementations live in extension crates (`varscope-ext-file`).
//!
//! ## Module Structure
//!
//! - [`market_data`]: Historical OHLC price sources and the `PriceFrame` they return
//! - [`ids`]: Instrument symbol newtype
//! - [`error`]: Error type shared by all sources
//!
//! ## Dependency Injection
//!
//! The engine receives its data source via its builder:
//!
//! ```ignore
//! RiskEngineBuilder::new()
//!     .with_config(EngineConfig::default())
//!     .with_data_source(Arc::new(CsvPriceSource::new("data/")?))
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod market_data;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::Symbol;
pub use market_data::{HistoricalDataSource, PriceColumn, PriceFrame, SourceType};

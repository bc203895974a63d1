//! # Varscope Engine
//!
//! The risk pipeline orchestrator for Varscope.
//!
//! This crate provides:
//! - [`RiskEngine`]: validates requests, fetches price history and runs the
//!   return VaR, range VaR and volatility analyses
//! - [`SessionState`]: caller-owned per-session results, phases and fetched frames
//! - [`EngineConfig`]: limits, defaults and numerical settings, loadable from TOML
//!
//! ## Architecture
//!
//! ```text
//! Request ─> Validator ─> HistoricalDataSource ─┬─> ReturnSeries ─┐
//!                             (session cache)   │                 ├─> MonteCarloVaR ─> Report
//!                                               ├─> RangeSeries ──┘
//!                                               │
//!                                               └─> VolatilityPair ──────────────────> Report
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let engine = RiskEngineBuilder::new()
//!     .with_config(EngineConfig::from_file("varscope.toml")?)
//!     .with_data_source(Arc::new(CsvPriceSource::new("data/")?))
//!     .build()?;
//!
//! let mut session = SessionState::new();
//! let report = engine.run_return_var(&mut session, &engine.default_return_var_request())?;
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod request;
pub mod state;
pub mod validation;

mod cache;

// Re-exports
pub use builder::RiskEngineBuilder;
pub use cache::FrameCache;
pub use config::{EngineConfig, LimitsConfig, RequestDefaults};
pub use engine::RiskEngine;
pub use error::{EngineError, EngineResult};
pub use report::{
    RangeVarReport, ReturnVarReport, VolatilityComparison, VolatilityRegime, VolatilityReport,
};
pub use request::{AnalysisKind, PriceWindow, RangeVarRequest, ReturnVarRequest, VolatilityRequest};
pub use state::{AnalysisSlot, Phase, SessionState};
pub use validation::Validator;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisKind, EngineConfig, EngineError, Phase, PriceWindow, RangeVarRequest,
        ReturnVarRequest, RiskEngine, RiskEngineBuilder, SessionState, VolatilityRequest,
    };
}

//! # varscope-risk
//!
//! Short-horizon risk estimators for a single instrument.
//!
//! This crate provides:
//!
//! - **Series builders**: horizon returns, rolling high-low ranges and paired
//!   short/long rolling volatility
//! - **Distribution**: sample mean and unbiased standard deviation
//! - **Simulation**: Monte Carlo draws from a normal distribution with an
//!   injected random source
//! - **VaR**: percentile threshold and conditional tail mean (CVaR)
//!
//! ## Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use varscope_core::{Date, PriceSeries};
//! use varscope_risk::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 6).unwrap();
//! let prices = PriceSeries::from_closes(start, &[100.0, 102.0, 101.0, 105.0, 103.0, 108.0]).unwrap();
//! let returns = ReturnSeries::build(&prices, 1).unwrap();
//!
//! let calc = MonteCarloVaR::new(1_000, 95.0).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let outcome = calc.run(&returns.values(), &mut rng).unwrap();
//! assert!(outcome.result.cvar.unwrap() <= outcome.result.var);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculator;
pub mod distribution;
mod error;
pub mod series;
pub mod simulation;
pub mod var;

pub use error::RiskError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::*;
    pub use crate::distribution::*;
    pub use crate::series::*;
    pub use crate::simulation::*;
    pub use crate::var::*;
    pub use crate::RiskError;
}

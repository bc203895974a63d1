//! # Varscope Math
//!
//! Statistical utilities for the Varscope risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, unbiased sample variance/standard deviation and
//!   linearly interpolated percentiles
//! - **Rolling windows**: Trailing sums and trailing sample standard deviations
//! - **Histogram**: Equal-width binning of simulated samples
//!
//! ## Design Philosophy
//!
//! - **Explicit failure**: Undefined statistics return `MathError` instead of NaN
//! - **Slices in, owned values out**: No hidden state between calls

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod histogram;
pub mod rolling;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::histogram::Histogram;
    pub use crate::rolling::{rolling_std_dev, rolling_sum};
    pub use crate::statistics::{mean, percentile, sample_std_dev, sample_variance};
}

pub use error::{MathError, MathResult};

//! # Varscope Core
//!
//! Core types shared by every Varscope crate.
//!
//! - **Types**: `Date`, `PriceSeries` (date, close) and `OhlcSeries`
//!   (date, high, low, close)
//! - **Errors**: `CoreError` for malformed dates and series
//!
//! Series are validated once at construction (strictly increasing dates,
//! finite prices) so downstream builders can index them without re-checking.
//!
//! ## Example
//!
//! ```rust
//! use varscope_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 6).unwrap();
//! let series = PriceSeries::from_closes(start, &[100.0, 102.0, 101.0]).unwrap();
//! assert_eq!(series.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, OhlcBar, OhlcSeries, PricePoint, PriceSeries};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, OhlcBar, OhlcSeries, PricePoint, PriceSeries};

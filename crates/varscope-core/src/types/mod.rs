//! Domain types for price history.
//!
//! - [`Date`]: Calendar date of an observation
//! - [`PriceSeries`]: Ordered (date, close) observations
//! - [`OhlcSeries`]: Ordered (date, high, low, close) observations

mod date;
mod series;

pub use date::Date;
pub use series::{OhlcBar, OhlcSeries, PricePoint, PriceSeries};

//! Derived series built from raw price history.
//!
//! - [`ReturnSeries`]: fractional change over a horizon of `h` observations
//! - [`RangeSeries`]: trailing sum of the high-low spread
//! - [`VolatilityPair`]: short and long rolling annualized volatility on a
//!   shared date index
//!
//! Leading entries without enough history are dropped, never zero-filled.

mod range;
mod returns;
mod volatility;

pub use range::*;
pub use returns::*;
pub use volatility::*;

use serde::{Deserialize, Serialize};
use varscope_core::Date;

/// A derived value tagged with the date of its last input observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    /// Observation date
    pub date: Date,
    /// Derived value
    pub value: f64,
}

impl DatedValue {
    /// Create a new dated value
    pub fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Series whose values feed the distribution estimator.
pub trait SampleSeries {
    /// Dated observations in order.
    fn points(&self) -> &[DatedValue];

    /// Observation values in date order.
    fn values(&self) -> Vec<f64> {
        self.points().iter().map(|p| p.value).collect()
    }

    /// Number of observations.
    fn len(&self) -> usize {
        self.points().len()
    }

    /// Returns true if there are no observations.
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }
}

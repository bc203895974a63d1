//! Analysis reports handed to renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

use varscope_core::Date;
use varscope_math::histogram::Histogram;
use varscope_risk::distribution::DistributionEstimate;
use varscope_risk::series::{RangeMeasure, VolatilityPair, VolatilityPoint};
use varscope_risk::var::VaRResult;

use crate::request::PriceWindow;

/// Monte Carlo VaR/CVaR of horizon returns.
///
/// `result` is in percent; `histogram` and `threshold` are in return units
/// so the threshold can be marked on the histogram directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnVarReport {
    /// Instrument and dates analysed
    pub window: PriceWindow,
    /// Return horizon in observations
    pub horizon: usize,
    /// Monte Carlo draws
    pub simulations: usize,
    /// Normal parameters fitted to the returns
    pub estimate: DistributionEstimate,
    /// VaR and CVaR, percent
    pub result: VaRResult,
    /// VaR threshold in return units
    pub threshold: f64,
    /// Distribution of the simulated returns
    pub histogram: Histogram,
}

impl fmt::Display for ReturnVarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-day {}",
            self.window.symbol, self.horizon, self.result
        )
    }
}

/// Monte Carlo VaR of rolling high-low ranges. No CVaR is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeVarReport {
    /// Instrument and dates analysed
    pub window: PriceWindow,
    /// Rolling range window in observations
    pub range_window: usize,
    /// How each session's range was measured
    pub measure: RangeMeasure,
    /// Monte Carlo draws
    pub simulations: usize,
    /// Normal parameters fitted to the ranges
    pub estimate: DistributionEstimate,
    /// VaR at the (100 - p)-th percentile; percent for relative ranges, price for absolute
    pub result: VaRResult,
    /// VaR threshold in range units
    pub threshold: f64,
    /// Distribution of the simulated ranges
    pub histogram: Histogram,
}

impl fmt::Display for RangeVarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-day range {}",
            self.window.symbol, self.range_window, self.result
        )
    }
}

/// Direction of short-term volatility relative to long-term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityRegime {
    /// Short above long
    Elevated,
    /// Short below long
    Subdued,
    /// Equal
    Neutral,
}

/// Latest aligned short/long reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityComparison {
    /// Date of the reading
    pub date: Date,
    /// Short-window volatility, annualized percent
    pub short: f64,
    /// Long-window volatility, annualized percent
    pub long: f64,
    /// Short minus long
    pub spread: f64,
    /// Sign of the spread
    pub regime: VolatilityRegime,
}

impl From<&VolatilityPoint> for VolatilityComparison {
    fn from(p: &VolatilityPoint) -> Self {
        let spread = p.spread();
        let regime = if spread > 0.0 {
            VolatilityRegime::Elevated
        } else if spread < 0.0 {
            VolatilityRegime::Subdued
        } else {
            VolatilityRegime::Neutral
        };
        Self {
            date: p.date,
            short: p.short,
            long: p.long,
            spread,
            regime,
        }
    }
}

/// Short vs. long rolling volatility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReport {
    /// Instrument and dates analysed
    pub window: PriceWindow,
    /// Aligned series
    pub pair: VolatilityPair,
    /// Comparison on the last common date; `None` if the windows share no date
    pub latest: Option<VolatilityComparison>,
}

impl VolatilityReport {
    /// Build the report from an aligned pair.
    pub fn new(window: PriceWindow, pair: VolatilityPair) -> Self {
        let latest = pair.latest().map(VolatilityComparison::from);
        Self {
            window,
            pair,
            latest,
        }
    }
}

//! Analysis requests.

use serde::{Deserialize, Serialize};
use std::fmt;

use varscope_core::Date;
use varscope_risk::series::RangeMeasure;
use varscope_traits::Symbol;

/// The three independent analyses a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Monte Carlo VaR/CVaR of horizon returns
    ReturnVar,
    /// Monte Carlo VaR of rolling high-low ranges
    RangeVar,
    /// Short vs. long rolling volatility
    Volatility,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisKind::ReturnVar => "return_var",
            AnalysisKind::RangeVar => "range_var",
            AnalysisKind::Volatility => "volatility",
        })
    }
}

/// Instrument and inclusive date range shared by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceWindow {
    /// Instrument symbol
    pub symbol: Symbol,
    /// First date requested
    pub start: Date,
    /// Last date requested
    pub end: Date,
}

impl PriceWindow {
    /// Create a window.
    pub fn new(symbol: impl Into<Symbol>, start: Date, end: Date) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            end,
        }
    }

    /// Calendar days from start to end (negative when inverted).
    pub fn span_days(&self) -> i64 {
        self.start.days_between(&self.end)
    }
}

impl fmt::Display for PriceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.symbol, self.start, self.end)
    }
}

/// Return VaR/CVaR request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnVarRequest {
    /// Instrument and dates
    pub window: PriceWindow,
    /// Return horizon in observations
    pub horizon: usize,
    /// Confidence percentile
    pub percentile: f64,
    /// Monte Carlo draws
    pub simulations: usize,
}

/// Range VaR request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeVarRequest {
    /// Instrument and dates
    pub window: PriceWindow,
    /// Rolling range window in observations
    pub range_window: usize,
    /// Confidence percentile
    pub percentile: f64,
    /// Monte Carlo draws
    pub simulations: usize,
    /// Range measure; the configured default when `None`
    pub measure: Option<RangeMeasure>,
}

/// Rolling volatility comparison request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRequest {
    /// Instrument and dates
    pub window: PriceWindow,
    /// Short rolling window in observations
    pub short_window: usize,
    /// Long rolling window in observations
    pub long_window: usize,
}

impl ReturnVarRequest {
    /// Request with explicit parameters.
    pub fn new(window: PriceWindow, horizon: usize, percentile: f64, simulations: usize) -> Self {
        Self {
            window,
            horizon,
            percentile,
            simulations,
        }
    }
}

impl RangeVarRequest {
    /// Request with explicit parameters and the configured range measure.
    pub fn new(window: PriceWindow, range_window: usize, percentile: f64, simulations: usize) -> Self {
        Self {
            window,
            range_window,
            percentile,
            simulations,
            measure: None,
        }
    }

    /// Use the given range measure.
    #[must_use]
    pub fn with_measure(mut self, measure: RangeMeasure) -> Self {
        self.measure = Some(measure);
        self
    }
}

impl VolatilityRequest {
    /// Request with explicit windows.
    pub fn new(window: PriceWindow, short_window: usize, long_window: usize) -> Self {
        Self {
            window,
            short_window,
            long_window,
        }
    }
}

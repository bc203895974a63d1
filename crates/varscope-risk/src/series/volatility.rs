//! Paired short/long rolling volatility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use varscope_core::{Date, PriceSeries};
use varscope_math::rolling::rolling_std_dev;

use super::DatedValue;
use crate::RiskError;

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS_PER_YEAR: f64 = 250.0;

/// Short and long volatility on one date, both annualized percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPoint {
    /// Observation date
    pub date: Date,
    /// Short-window annualized volatility (%)
    pub short: f64,
    /// Long-window annualized volatility (%)
    pub long: f64,
}

impl VolatilityPoint {
    /// Short minus long volatility, in percentage points.
    pub fn spread(&self) -> f64 {
        self.short - self.long
    }
}

/// Rolling annualized volatility over two windows on a common date index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityPair {
    short_window: usize,
    long_window: usize,
    points: Vec<VolatilityPoint>,
}

impl VolatilityPair {
    /// Build the pair with the default 250-day annualization.
    pub fn build(
        prices: &PriceSeries,
        short_window: usize,
        long_window: usize,
    ) -> Result<Self, RiskError> {
        Self::build_with_annualization(prices, short_window, long_window, TRADING_DAYS_PER_YEAR)
    }

    /// Build the pair.
    ///
    /// Daily simple returns are computed first; each window then takes the
    /// trailing sample standard deviation of those returns, scaled by
    /// `sqrt(trading_days) * 100`. Only dates present in both series are kept.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if either window exceeds the number of daily
    /// returns or is too short to define a sample deviation.
    pub fn build_with_annualization(
        prices: &PriceSeries,
        short_window: usize,
        long_window: usize,
        trading_days: f64,
    ) -> Result<Self, RiskError> {
        if !(trading_days.is_finite() && trading_days > 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "annualization days must be positive, got {trading_days}"
            )));
        }

        let daily = daily_returns(prices)?;
        let factor = trading_days.sqrt() * 100.0;

        let short = rolling_volatility(&daily, short_window, factor)?;
        let long = rolling_volatility(&daily, long_window, factor)?;

        let long_by_date: BTreeMap<Date, f64> =
            long.iter().map(|p| (p.date, p.value)).collect();
        let points: Vec<VolatilityPoint> = short
            .iter()
            .filter_map(|s| {
                long_by_date.get(&s.date).map(|&l| VolatilityPoint {
                    date: s.date,
                    short: s.value,
                    long: l,
                })
            })
            .collect();

        log::debug!(
            "volatility pair: short={} long={} aligned={} of {}/{}",
            short_window,
            long_window,
            points.len(),
            short.len(),
            long.len()
        );

        Ok(Self {
            short_window,
            long_window,
            points,
        })
    }

    /// Short window length.
    pub fn short_window(&self) -> usize {
        self.short_window
    }

    /// Long window length.
    pub fn long_window(&self) -> usize {
        self.long_window
    }

    /// Aligned observations in date order.
    pub fn points(&self) -> &[VolatilityPoint] {
        &self.points
    }

    /// Most recent aligned observation.
    pub fn latest(&self) -> Option<&VolatilityPoint> {
        self.points.last()
    }

    /// Number of aligned observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no dates are shared by both series.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn daily_returns(prices: &PriceSeries) -> Result<Vec<DatedValue>, RiskError> {
    let obs = prices.points();
    obs.windows(2)
        .map(|w| {
            if w[0].close == 0.0 {
                return Err(RiskError::InvalidInput(format!(
                    "zero close on {} cannot anchor a return",
                    w[0].date
                )));
            }
            Ok(DatedValue::new(w[1].date, w[1].close / w[0].close - 1.0))
        })
        .collect()
}

fn rolling_volatility(
    daily: &[DatedValue],
    window: usize,
    factor: f64,
) -> Result<Vec<DatedValue>, RiskError> {
    if window == 0 || window > daily.len() {
        return Err(RiskError::insufficient_data(
            format!("{window}-day volatility window"),
            window + 1,
            daily.len() + 1,
        ));
    }
    if window < 2 {
        // A single return has no sample deviation; every entry is undefined.
        return Err(RiskError::insufficient_data(
            format!("{window}-day volatility window"),
            2,
            window,
        ));
    }

    let values: Vec<f64> = daily.iter().map(|d| d.value).collect();
    let stds = rolling_std_dev(&values, window)?;

    Ok(daily[window - 1..]
        .iter()
        .zip(stds)
        .map(|(d, s)| DatedValue::new(d.date, s * factor))
        .collect())
}

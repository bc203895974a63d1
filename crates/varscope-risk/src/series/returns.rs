//! Horizon return series.

use serde::{Deserialize, Serialize};
use varscope_core::PriceSeries;

use super::{DatedValue, SampleSeries};
use crate::RiskError;

/// Fractional price changes measured over a fixed horizon.
///
/// Entry `i` is `close[i + h] / close[i] - 1`, dated at `i + h`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    horizon: usize,
    points: Vec<DatedValue>,
}

impl ReturnSeries {
    /// Build the return series of `prices` over `horizon` observations.
    ///
    /// # Arguments
    ///
    /// * `prices` - Closing prices in date order
    /// * `horizon` - Number of observations each return spans (>= 1)
    ///
    /// # Errors
    ///
    /// `InsufficientData` when fewer than `horizon + 1` prices exist, and
    /// `InvalidInput` for a zero horizon or a zero base price.
    pub fn build(prices: &PriceSeries, horizon: usize) -> Result<Self, RiskError> {
        if horizon == 0 {
            return Err(RiskError::InvalidInput(
                "return horizon must be at least 1".to_string(),
            ));
        }
        if prices.len() <= horizon {
            return Err(RiskError::insufficient_data(
                format!("{horizon}-day returns"),
                horizon + 1,
                prices.len(),
            ));
        }

        let obs = prices.points();
        let points = obs
            .iter()
            .zip(&obs[horizon..])
            .map(|(base, end)| {
                if base.close == 0.0 {
                    return Err(RiskError::InvalidInput(format!(
                        "zero close on {} cannot anchor a return",
                        base.date
                    )));
                }
                Ok(DatedValue::new(end.date, end.close / base.close - 1.0))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { horizon, points })
    }

    /// Horizon in observations.
    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

impl SampleSeries for ReturnSeries {
    fn points(&self) -> &[DatedValue] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use varscope_core::Date;

    fn prices(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(Date::from_ymd(2025, 1, 6).unwrap(), closes).unwrap()
    }

    #[test]
    fn test_daily_returns() {
        let series = prices(&[100.0, 102.0, 101.0, 105.0, 103.0, 108.0]);
        let returns = ReturnSeries::build(&series, 1).unwrap();

        let expected = [0.02, -0.0098, 0.0396, -0.0190, 0.0485];
        assert_eq!(returns.len(), 5);
        for (got, want) in returns.values().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-4);
        }
        // First return is dated at the second observation
        assert_eq!(returns.points()[0].date, series.points()[1].date);
    }

    #[test]
    fn test_multi_day_horizon() {
        let series = prices(&[100.0, 110.0, 121.0, 133.1]);
        let returns = ReturnSeries::build(&series, 2).unwrap();
        assert_eq!(returns.horizon(), 2);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns.values()[0], 0.21, epsilon = 1e-12);
        assert_relative_eq!(returns.values()[1], 0.21, epsilon = 1e-12);
    }

    #[test]
    fn test_horizon_too_long() {
        let series = prices(&[100.0, 101.0, 102.0]);
        let err = ReturnSeries::build(&series, 3).unwrap_err();
        assert_eq!(
            err,
            RiskError::InsufficientData {
                context: "3-day returns".to_string(),
                required: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let series = prices(&[100.0, 101.0]);
        assert!(matches!(
            ReturnSeries::build(&series, 0),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_base_price_rejected() {
        let series = prices(&[0.0, 101.0]);
        assert!(ReturnSeries::build(&series, 1).is_err());
    }
}

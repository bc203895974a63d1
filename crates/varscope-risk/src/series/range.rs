//! Rolling high-low range series.

use serde::{Deserialize, Serialize};
use varscope_core::OhlcSeries;
use varscope_math::rolling::rolling_sum;

use super::{DatedValue, SampleSeries};
use crate::RiskError;

/// How a single session's high-low spread is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMeasure {
    /// `high - low`, in price units
    Absolute,
    /// `(high - low) / low`, as a fraction of the low
    #[default]
    Relative,
}

impl RangeMeasure {
    /// Multiplier that converts a range value to reporting units.
    ///
    /// Relative ranges are reported in percent, absolute ranges in price.
    pub fn reporting_scale(&self) -> f64 {
        match self {
            RangeMeasure::Absolute => 1.0,
            RangeMeasure::Relative => 100.0,
        }
    }
}

/// Trailing sum of per-session ranges over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSeries {
    window: usize,
    measure: RangeMeasure,
    points: Vec<DatedValue>,
}

impl RangeSeries {
    /// Build the rolling range series.
    ///
    /// # Arguments
    ///
    /// * `bars` - High/low/close bars in date order
    /// * `window` - Trailing observations summed per entry (>= 1)
    /// * `measure` - Absolute or relative session range
    ///
    /// # Errors
    ///
    /// `InsufficientData` when fewer than `window` bars exist. A relative
    /// measure over a non-positive low is `InvalidInput`.
    pub fn build(
        bars: &OhlcSeries,
        window: usize,
        measure: RangeMeasure,
    ) -> Result<Self, RiskError> {
        if window == 0 {
            return Err(RiskError::InvalidInput(
                "range window must be at least 1".to_string(),
            ));
        }
        if bars.len() < window {
            return Err(RiskError::insufficient_data(
                format!("{window}-day range"),
                window,
                bars.len(),
            ));
        }

        let spreads = bars
            .bars()
            .iter()
            .map(|bar| match measure {
                RangeMeasure::Absolute => Ok(bar.spread()),
                RangeMeasure::Relative if bar.low > 0.0 => Ok(bar.spread() / bar.low),
                RangeMeasure::Relative => Err(RiskError::InvalidInput(format!(
                    "non-positive low {} on {}",
                    bar.low, bar.date
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sums = rolling_sum(&spreads, window)?;
        let points = bars.bars()[window - 1..]
            .iter()
            .zip(sums)
            .map(|(bar, sum)| DatedValue::new(bar.date, sum))
            .collect();

        Ok(Self {
            window,
            measure,
            points,
        })
    }

    /// Window length in observations.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Range measure used.
    pub fn measure(&self) -> RangeMeasure {
        self.measure
    }
}

impl SampleSeries for RangeSeries {
    fn points(&self) -> &[DatedValue] {
        &self.points
    }
}

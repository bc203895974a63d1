//! Ordered price series.
//!
//! Both series types enforce strictly increasing dates and finite prices at
//! construction and are immutable afterwards.

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{CoreError, CoreResult};

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// A single high/low/close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Observation date.
    pub date: Date,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
}

impl OhlcBar {
    /// Creates a new bar.
    #[must_use]
    pub fn new(date: Date, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            high,
            low,
            close,
        }
    }

    /// Returns the high-low spread of the session.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.high - self.low
    }
}

/// Ordered sequence of (date, close) observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series, validating date order and price finiteness.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnorderedSeries` if dates do not strictly increase
    /// and `CoreError::InvalidPrice` for NaN or infinite closes.
    pub fn new(points: Vec<PricePoint>) -> CoreResult<Self> {
        for point in &points {
            check_finite(point.date, point.close)?;
        }
        check_ordered(points.iter().map(|p| p.date))?;
        Ok(Self { points })
    }

    /// Creates a series from closes laid out on consecutive business days.
    ///
    /// The first observation lands on `start` (or the following weekday if
    /// `start` falls on a weekend).
    pub fn from_closes(start: Date, closes: &[f64]) -> CoreResult<Self> {
        let first = start.next_weekday();
        let points = closes
            .iter()
            .zip(0i32..)
            .map(|(&close, offset)| PricePoint::new(first.add_business_days(offset), close))
            .collect();
        Self::new(points)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the observations in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the closing prices in date order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Returns the observation dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// First observation, if any.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Last observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// Ordered sequence of (date, high, low, close) observations.
///
/// `high >= low` is assumed of upstream data and not re-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    bars: Vec<OhlcBar>,
}

impl OhlcSeries {
    /// Creates a series, validating date order and price finiteness.
    pub fn new(bars: Vec<OhlcBar>) -> CoreResult<Self> {
        for bar in &bars {
            check_finite(bar.date, bar.high)?;
            check_finite(bar.date, bar.low)?;
            check_finite(bar.date, bar.close)?;
        }
        check_ordered(bars.iter().map(|b| b.date))?;
        Ok(Self { bars })
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the bars in date order.
    #[must_use]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    /// Projects the series onto its closing prices.
    #[must_use]
    pub fn to_price_series(&self) -> PriceSeries {
        PriceSeries {
            points: self
                .bars
                .iter()
                .map(|b| PricePoint::new(b.date, b.close))
                .collect(),
        }
    }
}

fn check_finite(date: Date, value: f64) -> CoreResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidPrice {
            date: date.to_string(),
            value,
        })
    }
}

fn check_ordered(dates: impl Iterator<Item = Date>) -> CoreResult<()> {
    let mut previous: Option<Date> = None;
    for date in dates {
        if let Some(prev) = previous {
            if date <= prev {
                return Err(CoreError::UnorderedSeries {
                    previous: prev.to_string(),
                    current: date.to_string(),
                });
            }
        }
        previous = Some(date);
    }
    Ok(())
}

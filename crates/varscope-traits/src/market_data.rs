//! Historical market data source traits.
//!
//! A source answers one question: the daily OHLC history of a symbol between
//! two dates. The answer is a column-oriented [`PriceFrame`] because vendors
//! differ in which columns they deliver; callers convert the frame to the
//! typed series they need and get [`TraitError::MissingColumn`] when a
//! required column is absent.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraitError;
use crate::ids::Symbol;
use varscope_core::{Date, OhlcBar, OhlcSeries, PricePoint, PriceSeries};

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Remote vendor API (REST, vendor SDK)
    Vendor,
    /// File-based (CSV)
    File,
    /// In-process fixtures
    Memory,
}

/// Column of a daily price frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceColumn {
    /// Opening price
    Open,
    /// Session high
    High,
    /// Session low
    Low,
    /// Closing price
    Close,
}

impl PriceColumn {
    /// All columns, in conventional order.
    pub const ALL: [PriceColumn; 4] = [
        PriceColumn::Open,
        PriceColumn::High,
        PriceColumn::Low,
        PriceColumn::Close,
    ];

    /// Lowercase column name.
    pub fn name(&self) -> &'static str {
        match self {
            PriceColumn::Open => "open",
            PriceColumn::High => "high",
            PriceColumn::Low => "low",
            PriceColumn::Close => "close",
        }
    }
}

impl fmt::Display for PriceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Daily price history as delivered by a source.
///
/// Every present column has one value per entry of the date index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFrame {
    symbol: Symbol,
    dates: Vec<Date>,
    open: Option<Vec<f64>>,
    high: Option<Vec<f64>>,
    low: Option<Vec<f64>>,
    close: Option<Vec<f64>>,
}

impl PriceFrame {
    /// Create a frame with a date index and no columns.
    pub fn new(symbol: Symbol, dates: Vec<Date>) -> Self {
        Self {
            symbol,
            dates,
            open: None,
            high: None,
            low: None,
            close: None,
        }
    }

    /// Create an empty frame.
    pub fn empty(symbol: Symbol) -> Self {
        Self::new(symbol, Vec::new())
    }

    /// Attach a column.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the column length differs from the date index.
    pub fn with_column(mut self, column: PriceColumn, values: Vec<f64>) -> Result<Self, TraitError> {
        if values.len() != self.dates.len() {
            return Err(TraitError::InvalidInput(format!(
                "column {} has {} rows, date index has {}",
                column,
                values.len(),
                self.dates.len()
            )));
        }
        *self.slot_mut(column) = Some(values);
        Ok(self)
    }

    fn slot_mut(&mut self, column: PriceColumn) -> &mut Option<Vec<f64>> {
        match column {
            PriceColumn::Open => &mut self.open,
            PriceColumn::High => &mut self.high,
            PriceColumn::Low => &mut self.low,
            PriceColumn::Close => &mut self.close,
        }
    }

    /// Symbol the frame belongs to.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Date index.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Values of a column, if present.
    pub fn column(&self, column: PriceColumn) -> Option<&[f64]> {
        match column {
            PriceColumn::Open => self.open.as_deref(),
            PriceColumn::High => self.high.as_deref(),
            PriceColumn::Low => self.low.as_deref(),
            PriceColumn::Close => self.close.as_deref(),
        }
    }

    /// Returns true if the column is present.
    pub fn has_column(&self, column: PriceColumn) -> bool {
        self.column(column).is_some()
    }

    fn require(&self, column: PriceColumn) -> Result<&[f64], TraitError> {
        self.column(column)
            .ok_or(TraitError::MissingColumn(column))
    }

    /// Rows whose date falls within `[start, end]`.
    pub fn slice(&self, start: Date, end: Date) -> PriceFrame {
        let keep: Vec<usize> = self
            .dates
            .iter()
            .enumerate()
            .filter(|(_, d)| **d >= start && **d <= end)
            .map(|(i, _)| i)
            .collect();
        let pick = |col: &Option<Vec<f64>>| {
            col.as_ref()
                .map(|values| keep.iter().map(|&i| values[i]).collect())
        };

        PriceFrame {
            symbol: self.symbol.clone(),
            dates: keep.iter().map(|&i| self.dates[i]).collect(),
            open: pick(&self.open),
            high: pick(&self.high),
            low: pick(&self.low),
            close: pick(&self.close),
        }
    }

    /// Closing price series.
    ///
    /// # Errors
    ///
    /// `MissingColumn(Close)` without a close column; `ParseError` if the
    /// dates are not strictly increasing or a close is not finite.
    pub fn price_series(&self) -> Result<PriceSeries, TraitError> {
        let close = self.require(PriceColumn::Close)?;
        let points = self
            .dates
            .iter()
            .zip(close)
            .map(|(&date, &c)| PricePoint::new(date, c))
            .collect();
        Ok(PriceSeries::new(points)?)
    }

    /// High/low/close series.
    ///
    /// # Errors
    ///
    /// `MissingColumn` naming the first absent of high, low, close.
    pub fn ohlc_series(&self) -> Result<OhlcSeries, TraitError> {
        let high = self.require(PriceColumn::High)?;
        let low = self.require(PriceColumn::Low)?;
        let close = self.require(PriceColumn::Close)?;
        let bars = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, &date)| OhlcBar::new(date, high[i], low[i], close[i]))
            .collect();
        Ok(OhlcSeries::new(bars)?)
    }
}

/// Provider of daily price history.
///
/// Calls are synchronous and may block on I/O. Both date bounds are
/// inclusive. A symbol the source does not know yields an empty frame rather
/// than an error.
pub trait HistoricalDataSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Fetch daily history for `symbol` between `start` and `end`.
    fn fetch(&self, symbol: &Symbol, start: Date, end: Date) -> Result<PriceFrame, TraitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2025, 3, day).unwrap()
    }

    fn frame() -> PriceFrame {
        PriceFrame::new(Symbol::new("SPY"), vec![d(3), d(4), d(5)])
            .with_column(PriceColumn::Close, vec![100.0, 101.0, 102.0])
            .unwrap()
    }

    #[test]
    fn test_price_series_from_close() {
        let series = frame().price_series().unwrap();
        assert_eq!(series.closes(), vec![100.0, 101.0, 102.0]);
    }

    #[test]
    fn test_ohlc_requires_high() {
        let err = frame().ohlc_series().unwrap_err();
        assert_eq!(err, TraitError::MissingColumn(PriceColumn::High));
        assert_eq!(err.to_string(), "missing column: high");
    }

    #[test]
    fn test_ohlc_series() {
        let frame = frame()
            .with_column(PriceColumn::High, vec![101.0, 102.0, 103.0])
            .unwrap()
            .with_column(PriceColumn::Low, vec![99.0, 100.0, 101.0])
            .unwrap();
        let series = frame.ohlc_series().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.bars()[2].high, 103.0);
    }

    #[test]
    fn test_column_length_checked() {
        let result = PriceFrame::new(Symbol::new("SPY"), vec![d(3)])
            .with_column(PriceColumn::Close, vec![1.0, 2.0]);
        assert!(matches!(result, Err(TraitError::InvalidInput(_))));
    }

    #[test]
    fn test_slice_is_inclusive() {
        let sliced = frame().slice(d(4), d(5));
        assert_eq!(sliced.dates(), &[d(4), d(5)]);
        assert_eq!(sliced.column(PriceColumn::Close), Some(&[101.0, 102.0][..]));
        assert!(!sliced.has_column(PriceColumn::Open));
        assert!(frame().slice(d(6), d(9)).is_empty());
    }

    #[test]
    fn test_frame_serializes() {
        let json = serde_json::to_string(&frame()).unwrap();
        let back: PriceFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, frame());
    }
}

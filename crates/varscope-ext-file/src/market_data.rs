//! File-based and in-memory price history sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use varscope_core::Date;
use varscope_traits::error::TraitError;
use varscope_traits::ids::Symbol;
use varscope_traits::market_data::*;

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV-based price source for testing/EOD.
///
/// Each symbol lives in its own file, `<dir>/<SYMBOL>.csv`, with a `date`
/// column (`YYYY-MM-DD`) and any of `open`, `high`, `low`, `close`. Header
/// matching ignores case and surrounding whitespace; other columns such as
/// `Adj Close` or `Volume` are skipped. Rows may appear in any order.
///
/// A row with a blank or `null`/`NaN`/`NA` price cell is dropped, as are
/// rows repeating an earlier date. Any other unparsable value fails the
/// fetch.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    /// Create a new CSV price source rooted at `dir`.
    ///
    /// A directory that does not exist yet is accepted and behaves as an
    /// empty source.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref().to_path_buf();
        if dir.exists() && !dir.is_dir() {
            return Err(TraitError::InvalidInput(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Directory the source reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `symbol`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the symbol is empty, contains a path separator or
    /// starts with a dot.
    pub fn path_for(&self, symbol: &Symbol) -> Result<PathBuf, TraitError> {
        let name = symbol.as_str();
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\', '\0']) {
            return Err(TraitError::InvalidInput(format!(
                "symbol '{name}' cannot name a price file"
            )));
        }
        Ok(self.dir.join(format!("{name}.csv")))
    }

    fn load(&self, path: &Path, symbol: &Symbol) -> Result<(CsvLayout, Vec<CsvRow>), TraitError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| TraitError::ParseError(e.to_string()))?
            .clone();
        let layout = CsvLayout::from_headers(&headers)?;

        let mut rows = Vec::new();
        let mut gaps = 0usize;
        for (i, result) in reader.records().enumerate() {
            let record = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            // Line 1 is the header.
            match layout.parse_row(&record, i + 2)? {
                Some(row) => rows.push(row),
                None => gaps += 1,
            }
        }
        rows.sort_by_key(|row| row.date);
        let before = rows.len();
        rows.dedup_by_key(|row| row.date);
        let duplicates = before - rows.len();

        if gaps > 0 || duplicates > 0 {
            log::warn!(
                "{}: dropped {} rows with missing prices and {} duplicate dates",
                path.display(),
                gaps,
                duplicates
            );
        }
        log::debug!(
            "loaded {} rows for {} from {}",
            rows.len(),
            symbol,
            path.display()
        );
        Ok((layout, rows))
    }
}

impl HistoricalDataSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn fetch(&self, symbol: &Symbol, start: Date, end: Date) -> Result<PriceFrame, TraitError> {
        let path = self.path_for(symbol)?;
        if !path.exists() {
            log::debug!("no price file for {} at {}", symbol, path.display());
            return Ok(PriceFrame::empty(symbol.clone())); // Empty source
        }

        let (layout, rows) = self.load(&path, symbol)?;
        let rows: Vec<CsvRow> = rows
            .into_iter()
            .filter(|row| row.date >= start && row.date <= end)
            .collect();

        let mut frame = PriceFrame::new(symbol.clone(), rows.iter().map(|r| r.date).collect());
        for column in layout.present() {
            let values = rows
                .iter()
                .map(|r| r.value(column).unwrap_or(f64::NAN))
                .collect();
            frame = frame.with_column(column, values)?;
        }
        Ok(frame)
    }
}

/// Positions of the recognised columns in a CSV header.
struct CsvLayout {
    date: usize,
    columns: Vec<(PriceColumn, usize)>,
}

impl CsvLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, TraitError> {
        let mut date = None;
        let mut columns = Vec::new();

        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim().to_ascii_lowercase();
            if name == "date" {
                date = Some(idx);
                continue;
            }
            if let Some(column) = PriceColumn::ALL.into_iter().find(|c| c.name() == name) {
                columns.push((column, idx));
            }
        }

        let date = date.ok_or_else(|| TraitError::ParseError("missing date column".into()))?;
        Ok(Self { date, columns })
    }

    fn present(&self) -> Vec<PriceColumn> {
        PriceColumn::ALL
            .into_iter()
            .filter(|c| self.columns.iter().any(|(col, _)| col == c))
            .collect()
    }

    /// Parse one record; `None` when a price cell is missing.
    fn parse_row(
        &self,
        record: &csv::StringRecord,
        line: usize,
    ) -> Result<Option<CsvRow>, TraitError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let date: Date = field(self.date)
            .parse()
            .map_err(|e| TraitError::ParseError(format!("line {line}: {e}")))?;

        let mut row = CsvRow {
            date,
            values: [None; 4],
        };
        for &(column, idx) in &self.columns {
            let raw = field(idx);
            if is_missing(raw) {
                log::trace!("line {line}: missing {column}, row skipped");
                return Ok(None);
            }
            let value: f64 = raw.parse().map_err(|_| {
                TraitError::ParseError(format!("line {line}: invalid {column} value '{raw}'"))
            })?;
            row.values[column_slot(column)] = Some(value);
        }
        Ok(Some(row))
    }
}

struct CsvRow {
    date: Date,
    values: [Option<f64>; 4],
}

impl CsvRow {
    fn value(&self, column: PriceColumn) -> Option<f64> {
        self.values[column_slot(column)]
    }
}

fn is_missing(raw: &str) -> bool {
    ["", "null", "nan", "na", "n/a", "-"]
        .iter()
        .any(|marker| raw.eq_ignore_ascii_case(marker))
}

fn column_slot(column: PriceColumn) -> usize {
    match column {
        PriceColumn::Open => 0,
        PriceColumn::High => 1,
        PriceColumn::Low => 2,
        PriceColumn::Close => 3,
    }
}

// =============================================================================
// IN-MEMORY PRICE SOURCE
// =============================================================================

/// Price source serving frames registered up front.
///
/// Fetches slice the registered frame to the requested dates. Unknown symbols
/// yield an empty frame.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    frames: HashMap<Symbol, PriceFrame>,
}

impl InMemoryPriceSource {
    /// Create an empty in-memory source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame under its own symbol, replacing any previous one.
    pub fn insert(&mut self, frame: PriceFrame) {
        self.frames.insert(frame.symbol().clone(), frame);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_frame(mut self, frame: PriceFrame) -> Self {
        self.insert(frame);
        self
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no symbol is registered.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl HistoricalDataSource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn fetch(&self, symbol: &Symbol, start: Date, end: Date) -> Result<PriceFrame, TraitError> {
        Ok(self
            .frames
            .get(symbol)
            .map(|frame| frame.slice(start, end))
            .unwrap_or_else(|| PriceFrame::empty(symbol.clone())))
    }
}

// =============================================================================
// EMPTY PRICE SOURCE
// =============================================================================

/// Empty price source for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyPriceSource;

impl HistoricalDataSource for EmptyPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn fetch(&self, symbol: &Symbol, _start: Date, _end: Date) -> Result<PriceFrame, TraitError> {
        Ok(PriceFrame::empty(symbol.clone()))
    }
}

//! # Varscope Ext File
//!
//! File-based and in-memory price history for the Varscope risk engine.
//!
//! This crate provides default implementations for testing, EOD loads, and demos:
//! - CSV-based price source (one file per symbol)
//! - In-memory price source with registered frames
//! - Empty price source
//!
//! For live vendor data, implement [`HistoricalDataSource`] in a separate extension.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;

pub use market_data::*;

use std::path::Path;
use std::sync::Arc;

use varscope_traits::error::TraitError;
use varscope_traits::market_data::HistoricalDataSource;

/// Create a CSV-backed price source reading `<dir>/<SYMBOL>.csv`.
pub fn create_file_price_source(
    dir: impl AsRef<Path>,
) -> Result<Arc<dyn HistoricalDataSource>, TraitError> {
    Ok(Arc::new(CsvPriceSource::new(dir)?))
}

/// Create a price source that never returns rows (for testing/development).
pub fn create_empty_price_source() -> Arc<dyn HistoricalDataSource> {
    Arc::new(EmptyPriceSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use varscope_core::Date;
    use varscope_traits::{SourceType, Symbol};

    #[test]
    fn test_factories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("SPY.csv"), "date,close\n2025-03-03,100\n").unwrap();

        let start = Date::from_ymd(2025, 3, 1).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        let spy = Symbol::new("SPY");

        let file = create_file_price_source(tmp.path()).unwrap();
        assert_eq!(file.source_type(), SourceType::File);
        assert_eq!(file.fetch(&spy, start, end).unwrap().len(), 1);

        let empty = create_empty_price_source();
        assert!(empty.fetch(&spy, start, end).unwrap().is_empty());
    }
}

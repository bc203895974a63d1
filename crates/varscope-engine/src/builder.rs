//! Builder pattern for the risk engine.

use std::sync::Arc;

use varscope_core::Date;
use varscope_traits::HistoricalDataSource;

use crate::config::EngineConfig;
use crate::engine::RiskEngine;
use crate::error::EngineError;

/// Builder for constructing a [`RiskEngine`].
pub struct RiskEngineBuilder {
    config: Option<EngineConfig>,
    source: Option<Arc<dyn HistoricalDataSource>>,
    today: Option<Date>,
}

impl RiskEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            source: None,
            today: None,
        }
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the historical price source.
    pub fn with_data_source(mut self, source: Arc<dyn HistoricalDataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Pin the date treated as today when validating requests.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the risk engine.
    pub fn build(self) -> Result<RiskEngine, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let source = self
            .source
            .ok_or_else(|| EngineError::config("data source not configured"))?;

        Ok(RiskEngine::new(config, source, self.today))
    }
}

impl Default for RiskEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varscope_traits::{PriceFrame, SourceType, Symbol, TraitError};

    struct NoData;

    impl HistoricalDataSource for NoData {
        fn source_type(&self) -> SourceType {
            SourceType::Memory
        }

        fn fetch(&self, symbol: &Symbol, _: Date, _: Date) -> Result<PriceFrame, TraitError> {
            Ok(PriceFrame::empty(symbol.clone()))
        }
    }

    #[test]
    fn test_requires_data_source() {
        let err = RiskEngineBuilder::new().build().unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.histogram_bins = 0;
        let err = RiskEngineBuilder::new()
            .with_config(config)
            .with_data_source(Arc::new(NoData))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_pinned_today() {
        let today = Date::from_ymd(2025, 6, 30).unwrap();
        let engine = RiskEngineBuilder::new()
            .with_data_source(Arc::new(NoData))
            .with_today(today)
            .build()
            .unwrap();
        assert_eq!(engine.today(), today);

        let req = engine.default_return_var_request();
        assert_eq!(req.window.end, today);
        assert_eq!(req.window.span_days(), 500);
        assert_eq!(req.window.symbol.as_str(), "SPY");
        assert_eq!(req.horizon, 5);
    }
}

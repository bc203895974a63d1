//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so a partial file (or none at
//! all) is valid:
//!
//! ```toml
//! histogram_bins = 40
//! seed = 7
//! cache_capacity = 8
//!
//! [limits]
//! max_simulations = 5000
//!
//! [defaults]
//! symbol = "QQQ"
//! lookback_days = 365
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use varscope_risk::series::{RangeMeasure, TRADING_DAYS_PER_YEAR};
use varscope_risk::simulation::{MAX_SIMULATIONS, MIN_SIMULATIONS};

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{EngineError, EngineResult};

/// Inclusive bounds applied to request parameters before any fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Smallest return horizon, in observations
    pub min_horizon: usize,
    /// Largest return horizon, in observations
    pub max_horizon: usize,
    /// Smallest VaR percentile
    pub min_percentile: f64,
    /// Largest VaR percentile
    pub max_percentile: f64,
    /// Fewest Monte Carlo draws
    pub min_simulations: usize,
    /// Most Monte Carlo draws
    pub max_simulations: usize,
    /// Smallest high-low range window
    pub min_range_window: usize,
    /// Largest high-low range window
    pub max_range_window: usize,
    /// Smallest volatility window; the largest is the requested calendar span
    pub min_vol_window: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_horizon: 1,
            max_horizon: 30,
            min_percentile: 0.01,
            max_percentile: 99.99,
            min_simulations: MIN_SIMULATIONS,
            max_simulations: MAX_SIMULATIONS,
            min_range_window: 1,
            max_range_window: 30,
            min_vol_window: 1,
        }
    }
}

/// Values used for requests the caller does not spell out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Instrument symbol
    pub symbol: String,
    /// Calendar days between the default start date and today
    pub lookback_days: i64,
    /// Return horizon
    pub horizon: usize,
    /// Return VaR percentile
    pub percentile: f64,
    /// Monte Carlo draws
    pub simulations: usize,
    /// High-low range window
    pub range_window: usize,
    /// Range VaR percentile
    pub range_percentile: f64,
    /// Short volatility window
    pub short_window: usize,
    /// Long volatility window
    pub long_window: usize,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            symbol: "SPY".to_string(),
            lookback_days: 500,
            horizon: 5,
            percentile: 95.0,
            simulations: 1_000,
            range_window: 5,
            range_percentile: 95.0,
            short_window: 20,
            long_window: 100,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Request parameter limits
    pub limits: LimitsConfig,
    /// Default request values
    pub defaults: RequestDefaults,
    /// Trading days per year for volatility annualization
    pub annualization_days: f64,
    /// Histogram bins in VaR reports
    pub histogram_bins: usize,
    /// Range measure used when a request does not name one
    pub range_measure: RangeMeasure,
    /// Fixed RNG seed; entropy-seeded per run when absent
    pub seed: Option<u64>,
    /// Frames kept per session before the oldest is evicted
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            defaults: RequestDefaults::default(),
            annualization_days: TRADING_DAYS_PER_YEAR,
            histogram_bins: 50,
            range_measure: RangeMeasure::default(),
            seed: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that contradict each other or the simulator.
    pub fn validate(&self) -> EngineResult<()> {
        let l = &self.limits;

        if l.min_horizon == 0 || l.min_horizon > l.max_horizon {
            return Err(EngineError::config(format!(
                "horizon limits [{}, {}] are invalid",
                l.min_horizon, l.max_horizon
            )));
        }
        if !(l.min_percentile > 0.0 && l.min_percentile <= l.max_percentile && l.max_percentile < 100.0)
        {
            return Err(EngineError::config(format!(
                "percentile limits [{}, {}] must lie inside (0, 100)",
                l.min_percentile, l.max_percentile
            )));
        }
        if l.min_simulations < MIN_SIMULATIONS || l.min_simulations > l.max_simulations {
            return Err(EngineError::config(format!(
                "simulation limits [{}, {}] are invalid (minimum is {MIN_SIMULATIONS})",
                l.min_simulations, l.max_simulations
            )));
        }
        if l.min_range_window == 0 || l.min_range_window > l.max_range_window {
            return Err(EngineError::config(format!(
                "range window limits [{}, {}] are invalid",
                l.min_range_window, l.max_range_window
            )));
        }
        if l.min_vol_window == 0 {
            return Err(EngineError::config("min_vol_window must be at least 1"));
        }
        if !(self.annualization_days.is_finite() && self.annualization_days > 0.0) {
            return Err(EngineError::config(format!(
                "annualization_days must be positive, got {}",
                self.annualization_days
            )));
        }
        if self.histogram_bins == 0 {
            return Err(EngineError::config("histogram_bins must be at least 1"));
        }
        if self.cache_capacity == 0 {
            return Err(EngineError::config("cache_capacity must be at least 1"));
        }

        let d = &self.defaults;
        if d.lookback_days < 0 {
            return Err(EngineError::config("lookback_days must not be negative"));
        }
        if !(l.min_horizon..=l.max_horizon).contains(&d.horizon)
            || !(l.min_range_window..=l.max_range_window).contains(&d.range_window)
            || !(l.min_simulations..=l.max_simulations).contains(&d.simulations)
            || !(l.min_percentile..=l.max_percentile).contains(&d.percentile)
            || !(l.min_percentile..=l.max_percentile).contains(&d.range_percentile)
            || d.short_window < l.min_vol_window
            || d.long_window < l.min_vol_window
        {
            return Err(EngineError::config("default request values fall outside the limits"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.defaults.symbol, "SPY");
        assert_eq!(config.histogram_bins, 50);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.limits.max_simulations, 10_000);
        assert_eq!(config.range_measure, RangeMeasure::Relative);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 42
            range_measure = "absolute"

            [limits]
            max_simulations = 5000
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.range_measure, RangeMeasure::Absolute);
        assert_eq!(config.limits.max_simulations, 5_000);
        assert_eq!(config.limits.max_horizon, 30);
        assert_eq!(config.defaults.lookback_days, 500);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let err = EngineConfig::from_toml_str("[limits]\nmin_horizon = 10\nmax_horizon = 5\n")
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_rejects_simulation_floor_below_engine_minimum() {
        let err = EngineConfig::from_toml_str("[limits]\nmin_simulations = 10\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_rejects_default_outside_limits() {
        let err = EngineConfig::from_toml_str("[defaults]\nhorizon = 45\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(EngineConfig::from_toml_str("cache_capacity = 0")
            .unwrap_err()
            .to_string()
            .contains("cache_capacity"));

        let err = EngineConfig::from_toml_str("histogram_bins = \"many\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/varscope.toml").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}

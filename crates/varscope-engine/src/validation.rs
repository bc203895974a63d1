//! Request validation.
//!
//! Runs before any fetch. A request that fails here never reaches the data
//! source.

use varscope_core::Date;

use crate::config::LimitsConfig;
use crate::error::{EngineError, EngineResult};
use crate::request::{PriceWindow, RangeVarRequest, ReturnVarRequest, VolatilityRequest};

/// Checks requests against configured limits and a reference date.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    limits: &'a LimitsConfig,
    today: Date,
}

impl<'a> Validator<'a> {
    /// Validator treating `today` as the latest admissible date.
    pub fn new(limits: &'a LimitsConfig, today: Date) -> Self {
        Self { limits, today }
    }

    /// Symbol present, dates ordered and not in the future.
    pub fn check_window(&self, window: &PriceWindow) -> EngineResult<()> {
        if window.symbol.is_empty() {
            return Err(EngineError::validation("symbol must not be empty"));
        }
        if window.end < window.start {
            return Err(EngineError::validation(format!(
                "end date {} precedes start date {}",
                window.end, window.start
            )));
        }
        if window.start > self.today || window.end > self.today {
            return Err(EngineError::validation(format!(
                "dates must not be after {}",
                self.today
            )));
        }
        Ok(())
    }

    /// Validate a return VaR request.
    pub fn return_var(&self, req: &ReturnVarRequest) -> EngineResult<()> {
        self.check_window(&req.window)?;
        in_range(
            "horizon",
            req.horizon,
            self.limits.min_horizon,
            self.limits.max_horizon,
        )?;
        self.check_percentile(req.percentile)?;
        self.check_simulations(req.simulations)
    }

    /// Validate a range VaR request.
    pub fn range_var(&self, req: &RangeVarRequest) -> EngineResult<()> {
        self.check_window(&req.window)?;
        in_range(
            "range window",
            req.range_window,
            self.limits.min_range_window,
            self.limits.max_range_window,
        )?;
        self.check_percentile(req.percentile)?;
        self.check_simulations(req.simulations)
    }

    /// Validate a volatility request.
    ///
    /// Windows are bounded by the calendar span of the request, which is
    /// only an upper bound on the trading days actually returned.
    pub fn volatility(&self, req: &VolatilityRequest) -> EngineResult<()> {
        self.check_window(&req.window)?;
        let span = usize::try_from(req.window.span_days()).unwrap_or(0);
        in_range("short window", req.short_window, self.limits.min_vol_window, span)?;
        in_range("long window", req.long_window, self.limits.min_vol_window, span)
    }

    fn check_percentile(&self, p: f64) -> EngineResult<()> {
        let (lo, hi) = (self.limits.min_percentile, self.limits.max_percentile);
        if !(p >= lo && p <= hi) {
            return Err(EngineError::validation(format!(
                "percentile must be between {lo} and {hi}, got {p}"
            )));
        }
        Ok(())
    }

    fn check_simulations(&self, n: usize) -> EngineResult<()> {
        in_range(
            "simulation count",
            n,
            self.limits.min_simulations,
            self.limits.max_simulations,
        )
    }
}

fn in_range(name: &str, value: usize, lo: usize, hi: usize) -> EngineResult<()> {
    if value < lo || value > hi {
        return Err(EngineError::validation(format!(
            "{name} must be between {lo} and {hi}, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> Date {
        Date::from_ymd(2025, 6, 30).unwrap()
    }

    fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> PriceWindow {
        PriceWindow::new(
            "SPY",
            Date::from_ymd(start.0, start.1, start.2).unwrap(),
            Date::from_ymd(end.0, end.1, end.2).unwrap(),
        )
    }

    fn return_req() -> ReturnVarRequest {
        ReturnVarRequest::new(window((2024, 1, 2), (2025, 6, 27)), 5, 95.0, 1_000)
    }

    #[test]
    fn test_valid_request_passes() {
        let limits = LimitsConfig::default();
        Validator::new(&limits, today()).return_var(&return_req()).unwrap();
    }

    #[test]
    fn test_inverted_dates() {
        let limits = LimitsConfig::default();
        let mut req = return_req();
        req.window = window((2025, 3, 2), (2025, 3, 1));
        let err = Validator::new(&limits, today()).return_var(&req).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_future_dates() {
        let limits = LimitsConfig::default();
        let mut req = return_req();
        req.window = window((2025, 6, 1), (2025, 7, 1));
        assert!(Validator::new(&limits, today()).return_var(&req).is_err());
    }

    #[test]
    fn test_blank_symbol() {
        let limits = LimitsConfig::default();
        let mut req = return_req();
        req.window.symbol = "   ".into();
        assert!(Validator::new(&limits, today()).return_var(&req).is_err());
    }

    #[test]
    fn test_parameter_bounds() {
        let limits = LimitsConfig::default();
        let v = Validator::new(&limits, today());

        for (horizon, percentile, sims) in [
            (0, 95.0, 1_000),
            (31, 95.0, 1_000),
            (5, 0.0, 1_000),
            (5, 99.995, 1_000),
            (5, f64::NAN, 1_000),
            (5, 95.0, 99),
            (5, 95.0, 10_001),
        ] {
            let mut req = return_req();
            req.horizon = horizon;
            req.percentile = percentile;
            req.simulations = sims;
            assert!(v.return_var(&req).is_err(), "{horizon} {percentile} {sims}");
        }

        let mut req = return_req();
        req.horizon = 30;
        req.percentile = 0.01;
        req.simulations = 10_000;
        v.return_var(&req).unwrap();
    }

    #[test]
    fn test_range_window_bounds() {
        let limits = LimitsConfig::default();
        let v = Validator::new(&limits, today());
        let ok = RangeVarRequest::new(window((2025, 1, 2), (2025, 6, 27)), 30, 95.0, 500);
        v.range_var(&ok).unwrap();

        let bad = RangeVarRequest::new(window((2025, 1, 2), (2025, 6, 27)), 31, 95.0, 500);
        assert!(v.range_var(&bad).is_err());
    }

    #[test]
    fn test_vol_windows_bounded_by_span() {
        let limits = LimitsConfig::default();
        let v = Validator::new(&limits, today());
        // 30 calendar days
        let w = window((2025, 5, 1), (2025, 5, 31));

        v.volatility(&VolatilityRequest::new(w.clone(), 5, 30)).unwrap();
        assert!(v.volatility(&VolatilityRequest::new(w.clone(), 5, 31)).is_err());
        assert!(v.volatility(&VolatilityRequest::new(w, 0, 20)).is_err());
    }
}

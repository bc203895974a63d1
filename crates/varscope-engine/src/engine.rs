//! The risk engine: validation, fetch and computation for each analysis.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, info_span, warn};

use varscope_core::Date;
use varscope_risk::calculator::MonteCarloVaR;
use varscope_risk::series::{RangeSeries, ReturnSeries, VolatilityPair};
use varscope_traits::{HistoricalDataSource, PriceFrame};

use crate::cache::FrameCache;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::report::{RangeVarReport, ReturnVarReport, VolatilityReport};
use crate::request::{PriceWindow, RangeVarRequest, ReturnVarRequest, VolatilityRequest};
use crate::state::{AnalysisSlot, Phase, SessionState};
use crate::validation::Validator;

/// Runs the three analyses against one data source.
///
/// The engine holds no per-session data; results, phases and fetched
/// frames live in the [`SessionState`] passed to each run.
pub struct RiskEngine {
    config: EngineConfig,
    source: Arc<dyn HistoricalDataSource>,
    today: Option<Date>,
}

impl RiskEngine {
    /// Create an engine. Prefer [`RiskEngineBuilder`](crate::RiskEngineBuilder).
    pub fn new(
        config: EngineConfig,
        source: Arc<dyn HistoricalDataSource>,
        today: Option<Date>,
    ) -> Self {
        Self {
            config,
            source,
            today,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Latest date a request may name: the pinned date, or the local date.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(Date::today)
    }

    /// Fresh session sized by the configured cache capacity.
    pub fn new_session(&self) -> SessionState {
        SessionState::with_cache_capacity(self.config.cache_capacity)
    }

    /// Random source for one run: seeded from config, else from entropy.
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    // =========================================================================
    // DEFAULT REQUESTS
    // =========================================================================

    /// Configured symbol over the configured lookback ending today.
    pub fn default_window(&self) -> PriceWindow {
        let today = self.today();
        let d = &self.config.defaults;
        PriceWindow::new(d.symbol.as_str(), today - d.lookback_days, today)
    }

    /// Return VaR request built from configured defaults.
    pub fn default_return_var_request(&self) -> ReturnVarRequest {
        let d = &self.config.defaults;
        ReturnVarRequest::new(self.default_window(), d.horizon, d.percentile, d.simulations)
    }

    /// Range VaR request built from configured defaults.
    pub fn default_range_var_request(&self) -> RangeVarRequest {
        let d = &self.config.defaults;
        RangeVarRequest::new(
            self.default_window(),
            d.range_window,
            d.range_percentile,
            d.simulations,
        )
    }

    /// Volatility request built from configured defaults.
    pub fn default_volatility_request(&self) -> VolatilityRequest {
        let d = &self.config.defaults;
        VolatilityRequest::new(self.default_window(), d.short_window, d.long_window)
    }

    // =========================================================================
    // RUNS
    // =========================================================================

    /// Run return VaR/CVaR with the engine's random source.
    pub fn run_return_var<'s>(
        &self,
        session: &'s mut SessionState,
        request: &ReturnVarRequest,
    ) -> EngineResult<&'s ReturnVarReport> {
        let mut rng = self.rng();
        self.run_return_var_with_rng(session, request, &mut rng)
    }

    /// Run return VaR/CVaR drawing from `rng`.
    pub fn run_return_var_with_rng<'s, R: Rng + ?Sized>(
        &self,
        session: &'s mut SessionState,
        request: &ReturnVarRequest,
        rng: &mut R,
    ) -> EngineResult<&'s ReturnVarReport> {
        let bins = self.config.histogram_bins;
        self.execute(
            &mut session.return_var,
            &mut session.cache,
            &request.window,
            |v| v.return_var(request),
            |frame| Ok(frame.price_series()?),
            |prices| {
                let returns = ReturnSeries::build(&prices, request.horizon)?;
                let calc = MonteCarloVaR::new(request.simulations, request.percentile)?;
                let outcome = calc.run_series(&returns, rng)?;
                let histogram = outcome.sample.histogram(bins)?;

                info!(
                    var = outcome.result.var,
                    cvar = ?outcome.result.cvar,
                    observations = outcome.estimate.observations,
                    "return VaR computed"
                );

                Ok(ReturnVarReport {
                    window: request.window.clone(),
                    horizon: request.horizon,
                    simulations: calc.simulations(),
                    estimate: outcome.estimate,
                    threshold: outcome.result.var / calc.reducer().scale(),
                    result: outcome.result,
                    histogram,
                })
            },
        )
    }

    /// Run range VaR with the engine's random source.
    pub fn run_range_var<'s>(
        &self,
        session: &'s mut SessionState,
        request: &RangeVarRequest,
    ) -> EngineResult<&'s RangeVarReport> {
        let mut rng = self.rng();
        self.run_range_var_with_rng(session, request, &mut rng)
    }

    /// Run range VaR drawing from `rng`.
    pub fn run_range_var_with_rng<'s, R: Rng + ?Sized>(
        &self,
        session: &'s mut SessionState,
        request: &RangeVarRequest,
        rng: &mut R,
    ) -> EngineResult<&'s RangeVarReport> {
        let bins = self.config.histogram_bins;
        let measure = request.measure.unwrap_or(self.config.range_measure);
        self.execute(
            &mut session.range_var,
            &mut session.cache,
            &request.window,
            |v| v.range_var(request),
            |frame| Ok(frame.ohlc_series()?),
            |bars| {
                let ranges = RangeSeries::build(&bars, request.range_window, measure)?;
                let calc =
                    MonteCarloVaR::for_ranges(request.simulations, request.percentile, measure)?;
                let outcome = calc.run_series(&ranges, rng)?;
                let histogram = outcome.sample.histogram(bins)?;

                info!(
                    var = outcome.result.var,
                    measure = ?measure,
                    observations = outcome.estimate.observations,
                    "range VaR computed"
                );

                Ok(RangeVarReport {
                    window: request.window.clone(),
                    range_window: request.range_window,
                    measure,
                    simulations: calc.simulations(),
                    estimate: outcome.estimate,
                    threshold: outcome.result.var / calc.reducer().scale(),
                    result: outcome.result,
                    histogram,
                })
            },
        )
    }

    /// Run the short vs. long volatility comparison.
    pub fn run_volatility<'s>(
        &self,
        session: &'s mut SessionState,
        request: &VolatilityRequest,
    ) -> EngineResult<&'s VolatilityReport> {
        let days = self.config.annualization_days;
        self.execute(
            &mut session.volatility,
            &mut session.cache,
            &request.window,
            |v| v.volatility(request),
            |frame| Ok(frame.price_series()?),
            |prices| {
                let pair = VolatilityPair::build_with_annualization(
                    &prices,
                    request.short_window,
                    request.long_window,
                    days,
                )?;
                let report = VolatilityReport::new(request.window.clone(), pair);

                info!(
                    points = report.pair.len(),
                    spread = ?report.latest.map(|c| c.spread),
                    "volatility computed"
                );
                Ok(report)
            },
        )
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Drive one slot through validate → fetch → compute.
    ///
    /// Column extraction counts as part of fetching, so a missing column
    /// fails in the `Fetching` phase.
    fn execute<'s, T, S>(
        &self,
        slot: &'s mut AnalysisSlot<T>,
        cache: &mut FrameCache,
        window: &PriceWindow,
        validate: impl FnOnce(&Validator<'_>) -> EngineResult<()>,
        extract: impl FnOnce(&PriceFrame) -> EngineResult<S>,
        compute: impl FnOnce(S) -> EngineResult<T>,
    ) -> EngineResult<&'s T> {
        let span = info_span!("analysis", analysis = %slot.kind(), symbol = %window.symbol);
        let _guard = span.enter();

        slot.begin();
        let validator = Validator::new(&self.config.limits, self.today());
        if let Err(e) = validate(&validator) {
            warn!(phase = %Phase::Validating, error = %e, "request rejected");
            return Err(slot.fail(e));
        }

        slot.advance(Phase::Fetching);
        let input = match self.fetch(cache, window).and_then(|frame| extract(frame.as_ref())) {
            Ok(input) => input,
            Err(e) => {
                warn!(phase = %Phase::Fetching, error = %e, "fetch failed");
                return Err(slot.fail(e));
            }
        };

        slot.advance(Phase::Computing);
        match compute(input) {
            Ok(value) => Ok(slot.succeed(value)),
            Err(e) => {
                warn!(phase = %Phase::Computing, error = %e, "computation failed");
                Err(slot.fail(e))
            }
        }
    }

    fn fetch(&self, cache: &mut FrameCache, window: &PriceWindow) -> EngineResult<Arc<PriceFrame>> {
        if let Some(frame) = cache.get(&window.symbol, window.start, window.end) {
            debug!(rows = frame.len(), "frame served from session cache");
            return Ok(frame);
        }

        let frame = self
            .source
            .fetch(&window.symbol, window.start, window.end)?;
        if frame.is_empty() {
            return Err(EngineError::DataSource(format!(
                "no price data for {window}"
            )));
        }

        debug!(rows = frame.len(), source = ?self.source.source_type(), "frame fetched");
        Ok(cache.insert(window.symbol.clone(), window.start, window.end, frame))
    }
}

impl std::fmt::Debug for RiskEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskEngine")
            .field("config", &self.config)
            .field("source", &self.source.source_type())
            .field("today", &self.today)
            .finish()
    }
}

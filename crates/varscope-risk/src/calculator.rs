//! Integrated Monte Carlo VaR calculator.
//!
//! Wires the distribution estimate, the sampler and the reducer together so
//! the return and range analyses share one code path and differ only in
//! configuration.
//!
//! # Example
//!
//! ```ignore
//! use varscope_risk::calculator::MonteCarloVaR;
//!
//! let calc = MonteCarloVaR::for_ranges(1_000, 95.0, RangeMeasure::Relative)?;
//! let outcome = calc.run_series(&ranges, &mut rng)?;
//! println!("{}", outcome.result);
//! ```

use rand::Rng;

use crate::distribution::DistributionEstimate;
use crate::series::{RangeMeasure, SampleSeries};
use crate::simulation::{MonteCarloEngine, SimulationSample};
use crate::var::{RiskReducer, VaRResult};
use crate::RiskError;

/// Everything produced by one simulated VaR run.
#[derive(Debug, Clone)]
pub struct SimulatedRisk {
    /// Normal parameters fitted to the input series.
    pub estimate: DistributionEstimate,
    /// Reduced risk figures.
    pub result: VaRResult,
    /// The simulated draws, in sample units.
    pub sample: SimulationSample,
}

/// Estimate → simulate → reduce pipeline.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloVaR {
    engine: MonteCarloEngine,
    reducer: RiskReducer,
    with_cvar: bool,
}

impl MonteCarloVaR {
    /// Calculator for horizon returns: percent output, with CVaR.
    ///
    /// # Errors
    ///
    /// Returns error if the simulation count or percentile is out of range.
    pub fn new(simulations: usize, percentile: f64) -> Result<Self, RiskError> {
        Ok(Self {
            engine: MonteCarloEngine::new(simulations)?,
            reducer: RiskReducer::new(percentile)?.with_scale(100.0),
            with_cvar: true,
        })
    }

    /// Calculator for rolling ranges: same threshold as returns, no CVaR.
    ///
    /// Output is in percent for relative ranges and price units for absolute
    /// ranges.
    pub fn for_ranges(
        simulations: usize,
        percentile: f64,
        measure: RangeMeasure,
    ) -> Result<Self, RiskError> {
        Ok(Self {
            engine: MonteCarloEngine::new(simulations)?,
            reducer: RiskReducer::new(percentile)?.with_scale(measure.reporting_scale()),
            with_cvar: false,
        })
    }

    /// Calculator from explicit parts.
    pub fn from_parts(engine: MonteCarloEngine, reducer: RiskReducer, with_cvar: bool) -> Self {
        Self {
            engine,
            reducer,
            with_cvar,
        }
    }

    /// Number of draws per run.
    pub fn simulations(&self) -> usize {
        self.engine.simulations()
    }

    /// The reducer in use.
    pub fn reducer(&self) -> &RiskReducer {
        &self.reducer
    }

    /// Run the pipeline over raw observations.
    pub fn run<R: Rng + ?Sized>(
        &self,
        values: &[f64],
        rng: &mut R,
    ) -> Result<SimulatedRisk, RiskError> {
        let estimate = DistributionEstimate::from_values(values)?;
        let sample = self.engine.simulate(&estimate, rng)?;
        let result = self.reducer.reduce(sample.draws(), self.with_cvar)?;

        log::debug!(
            "monte carlo var: n={} mean={:.6} std={:.6} -> {}",
            sample.len(),
            estimate.mean,
            estimate.std_dev,
            result
        );

        Ok(SimulatedRisk {
            estimate,
            result,
            sample,
        })
    }

    /// Run the pipeline over a derived series.
    pub fn run_series<S: SampleSeries + ?Sized, R: Rng + ?Sized>(
        &self,
        series: &S,
        rng: &mut R,
    ) -> Result<SimulatedRisk, RiskError> {
        self.run(&series.values(), rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use varscope_math::statistics::percentile;

    fn sample_returns() -> Vec<f64> {
        vec![
            0.012, -0.004, 0.008, -0.015, 0.003, 0.021, -0.009, 0.001, -0.002, 0.006,
        ]
    }

    #[test]
    fn test_return_var_pipeline() {
        let calc = MonteCarloVaR::new(2_000, 95.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = calc.run(&sample_returns(), &mut rng).unwrap();

        assert_eq!(outcome.sample.len(), 2_000);
        assert_eq!(outcome.estimate.observations, 10);

        // 5th percentile of N(mu, sigma) is near mu - 1.645 sigma, in percent
        let expected = (outcome.estimate.mean - 1.645 * outcome.estimate.std_dev) * 100.0;
        assert_relative_eq!(outcome.result.var, expected, epsilon = 0.15);

        let cvar = outcome.result.cvar.unwrap();
        assert!(cvar <= outcome.result.var);
    }

    #[test]
    fn test_range_var_pipeline() {
        let ranges = [0.021, 0.034, 0.018, 0.027, 0.041, 0.025, 0.030];
        let calc = MonteCarloVaR::for_ranges(1_000, 95.0, RangeMeasure::Relative).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = calc.run(&ranges, &mut rng).unwrap();

        assert!(outcome.result.cvar.is_none());
        // 5th percentile of the simulated ranges, in percent
        let expected = percentile(outcome.sample.draws(), 5.0).unwrap() * 100.0;
        assert_relative_eq!(outcome.result.var, expected, epsilon = 1e-12);
        assert!(outcome.result.var < outcome.estimate.mean * 100.0);
    }

    #[test]
    fn test_seed_reproducibility() {
        let calc = MonteCarloVaR::new(1_000, 99.0).unwrap();
        let a = calc
            .run(&sample_returns(), &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = calc
            .run(&sample_returns(), &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_too_few_observations() {
        let calc = MonteCarloVaR::new(1_000, 95.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            calc.run(&[0.01], &mut rng),
            Err(RiskError::InsufficientData { .. })
        ));
    }
}

//! Monte Carlo sampling from a normal distribution.
//!
//! The random source is always supplied by the caller, so a seeded
//! `StdRng` reproduces a run exactly while `StdRng::from_entropy()` gives
//! independent runs.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use varscope_math::histogram::Histogram;
use varscope_math::statistics::{mean, percentile, sample_std_dev};

use crate::distribution::DistributionEstimate;
use crate::RiskError;

/// Smallest accepted simulation count.
pub const MIN_SIMULATIONS: usize = 100;

/// Default ceiling on simulation count for interactive runs.
pub const MAX_SIMULATIONS: usize = 10_000;

/// Draws i.i.d. normal samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    simulations: usize,
}

impl MonteCarloEngine {
    /// Creates an engine producing `simulations` draws per run.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `simulations` is below [`MIN_SIMULATIONS`]. The
    /// upper bound is a policy of the caller, not of the sampler.
    pub fn new(simulations: usize) -> Result<Self, RiskError> {
        if simulations < MIN_SIMULATIONS {
            return Err(RiskError::InvalidInput(format!(
                "simulation count {simulations} below minimum {MIN_SIMULATIONS}"
            )));
        }
        Ok(Self { simulations })
    }

    /// Number of draws per run.
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Draw a sample from Normal(`params.mean`, `params.std_dev`).
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        params: &DistributionEstimate,
        rng: &mut R,
    ) -> Result<SimulationSample, RiskError> {
        self.simulate_normal(params.mean, params.std_dev, rng)
    }

    /// Draw a sample from Normal(`mean`, `std_dev`).
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a non-finite mean or a negative or non-finite
    /// standard deviation.
    pub fn simulate_normal<R: Rng + ?Sized>(
        &self,
        mean: f64,
        std_dev: f64,
        rng: &mut R,
    ) -> Result<SimulationSample, RiskError> {
        if !mean.is_finite() {
            return Err(RiskError::InvalidInput(format!(
                "distribution mean must be finite, got {mean}"
            )));
        }
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(RiskError::InvalidInput(format!(
                "standard deviation must be finite and non-negative, got {std_dev}"
            )));
        }

        let normal =
            Normal::new(mean, std_dev).map_err(|e| RiskError::InvalidInput(e.to_string()))?;
        let draws: Vec<f64> = (0..self.simulations).map(|_| normal.sample(rng)).collect();

        log::trace!(
            "drew {} samples from N({:.6}, {:.6})",
            draws.len(),
            mean,
            std_dev
        );

        Ok(SimulationSample { draws })
    }
}

/// A fixed-size set of simulated outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSample {
    draws: Vec<f64>,
}

impl SimulationSample {
    /// Wrap existing draws.
    pub fn from_draws(draws: Vec<f64>) -> Self {
        Self { draws }
    }

    /// The simulated values, in draw order.
    pub fn draws(&self) -> &[f64] {
        &self.draws
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Returns true if the sample is empty.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Empirical mean of the draws.
    pub fn mean(&self) -> Result<f64, RiskError> {
        Ok(mean(&self.draws)?)
    }

    /// Empirical sample standard deviation of the draws.
    pub fn std_dev(&self) -> Result<f64, RiskError> {
        Ok(sample_std_dev(&self.draws)?)
    }

    /// Percentile (0-100) of the draws.
    pub fn percentile(&self, q: f64) -> Result<f64, RiskError> {
        Ok(percentile(&self.draws, q)?)
    }

    /// Equal-width histogram of the draws.
    pub fn histogram(&self, bins: usize) -> Result<Histogram, RiskError> {
        Ok(Histogram::from_samples(&self.draws, bins)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_engine_rejects_small_counts() {
        assert!(MonteCarloEngine::new(99).is_err());
        assert_eq!(MonteCarloEngine::new(100).unwrap().simulations(), 100);
    }

    #[test]
    fn test_sample_size() {
        let engine = MonteCarloEngine::new(1_000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let sample = engine.simulate_normal(0.0, 0.01, &mut rng).unwrap();
        assert_eq!(sample.len(), 1_000);
    }

    #[test]
    fn test_seeded_runs_match() {
        let engine = MonteCarloEngine::new(500).unwrap();
        let a = engine
            .simulate_normal(0.001, 0.02, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = engine
            .simulate_normal(0.001, 0.02, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);

        let c = engine
            .simulate_normal(0.001, 0.02, &mut StdRng::seed_from_u64(43))
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_convergence_large_sample() {
        let engine = MonteCarloEngine::new(100_000).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let sample = engine.simulate_normal(0.05, 0.02, &mut rng).unwrap();

        assert_relative_eq!(sample.mean().unwrap(), 0.05, max_relative = 0.01);
        assert_relative_eq!(sample.std_dev().unwrap(), 0.02, max_relative = 0.01);
    }

    #[test]
    fn test_zero_std_dev_is_degenerate() {
        let engine = MonteCarloEngine::new(100).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let sample = engine.simulate_normal(0.003, 0.0, &mut rng).unwrap();
        assert!(sample.draws().iter().all(|&x| x == 0.003));
    }

    #[test]
    fn test_invalid_parameters() {
        let engine = MonteCarloEngine::new(100).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(engine.simulate_normal(0.0, -0.01, &mut rng).is_err());
        assert!(engine.simulate_normal(f64::NAN, 0.01, &mut rng).is_err());
        assert!(engine.simulate_normal(0.0, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_histogram_of_sample() {
        let engine = MonteCarloEngine::new(1_000).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let sample = engine.simulate_normal(0.0, 1.0, &mut rng).unwrap();
        let hist = sample.histogram(50).unwrap();
        assert_eq!(hist.bins(), 50);
        assert_eq!(hist.total(), 1_000);
    }
}

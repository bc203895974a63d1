//! Percentile reduction of a simulated sample.

use varscope_math::statistics::percentile;

use super::VaRResult;
use crate::RiskError;

/// Reduces a sample to a VaR threshold and, optionally, CVaR.
///
/// The threshold is the `(100 - p)`-th percentile of the sample and CVaR is
/// the mean of the draws strictly below it. Both figures are multiplied by
/// `scale` on output. Returns and ranges share this reduction.
///
/// When no draw lies strictly beyond the threshold (a degenerate sample),
/// CVaR is reported equal to VaR and `tail_count` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskReducer {
    percentile: f64,
    scale: f64,
}

impl RiskReducer {
    /// Reducer at percentile `p`, reporting raw units.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `0 < p < 100`.
    pub fn new(percentile: f64) -> Result<Self, RiskError> {
        if !(percentile > 0.0 && percentile < 100.0) {
            return Err(RiskError::InvalidInput(format!(
                "VaR percentile must be between 0 and 100 (exclusive), got {percentile}"
            )));
        }
        Ok(Self {
            percentile,
            scale: 1.0,
        })
    }

    /// Multiply reported figures by `scale` (100 turns fractions into percent).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Target percentile.
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Reporting multiplier.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Percentile of the sample at which the threshold sits.
    pub fn threshold_percentile(&self) -> f64 {
        100.0 - self.percentile
    }

    /// Threshold in sample units (unscaled).
    pub fn threshold(&self, samples: &[f64]) -> Result<f64, RiskError> {
        if samples.is_empty() {
            return Err(RiskError::insufficient_data("VaR reduction", 1, 0));
        }
        Ok(percentile(samples, self.threshold_percentile())?)
    }

    /// Reduce `samples` to a [`VaRResult`].
    ///
    /// # Arguments
    ///
    /// * `samples` - Simulated outcomes in sample units
    /// * `with_cvar` - Whether to compute the conditional tail mean
    pub fn reduce(&self, samples: &[f64], with_cvar: bool) -> Result<VaRResult, RiskError> {
        let threshold = self.threshold(samples)?;

        let (tail_sum, tail_count) = samples
            .iter()
            .filter(|&&x| x < threshold)
            .fold((0.0, 0usize), |(sum, n), &x| (sum + x, n + 1));

        let var = threshold * self.scale;
        let cvar = with_cvar.then(|| {
            if tail_count == 0 {
                log::debug!("empty tail beyond {threshold}; CVaR falls back to VaR");
                var
            } else {
                tail_sum / tail_count as f64 * self.scale
            }
        });

        Ok(VaRResult {
            var,
            cvar,
            percentile: self.percentile,
            tail_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ladder() -> Vec<f64> {
        // -0.05, -0.04, ..., 0.05
        (-5..=5).map(|i| i as f64 / 100.0).collect()
    }

    #[test]
    fn test_percentile_bounds() {
        assert!(RiskReducer::new(0.0).is_err());
        assert!(RiskReducer::new(100.0).is_err());
        assert!(RiskReducer::new(f64::NAN).is_err());
        assert!(RiskReducer::new(0.01).is_ok());
        assert!(RiskReducer::new(99.99).is_ok());
    }

    #[test]
    fn test_lower_tail_var_and_cvar() {
        let reducer = RiskReducer::new(90.0).unwrap().with_scale(100.0);
        let result = reducer.reduce(&ladder(), true).unwrap();

        // 10th percentile of 11 points: rank 1.0 -> -0.04
        assert_relative_eq!(result.var, -4.0, epsilon = 1e-9);
        // Only -0.05 lies strictly below
        assert_eq!(result.tail_count, 1);
        assert_relative_eq!(result.cvar.unwrap(), -5.0, epsilon = 1e-9);
        assert!(result.cvar.unwrap() <= result.var);
    }

    #[test]
    fn test_var_without_cvar() {
        let reducer = RiskReducer::new(90.0).unwrap();
        assert_relative_eq!(reducer.threshold_percentile(), 10.0);

        let result = reducer.reduce(&ladder(), false).unwrap();
        assert_relative_eq!(result.var, -0.04, epsilon = 1e-12);
        assert!(result.cvar.is_none());
        assert_eq!(result.tail_count, 1);
    }

    #[test]
    fn test_empty_tail_falls_back_to_var() {
        let reducer = RiskReducer::new(95.0).unwrap().with_scale(100.0);
        let result = reducer.reduce(&[0.01; 200], true).unwrap();
        assert_eq!(result.tail_count, 0);
        assert_relative_eq!(result.var, 1.0, epsilon = 1e-12);
        assert_eq!(result.cvar, Some(result.var));
    }

    #[test]
    fn test_empty_sample() {
        let reducer = RiskReducer::new(95.0).unwrap();
        assert!(matches!(
            reducer.reduce(&[], true),
            Err(RiskError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_result_json_round_trip() {
        let result = RiskReducer::new(75.0)
            .unwrap()
            .with_scale(100.0)
            .reduce(&[-0.5, -0.25, 0.0, 0.25, 0.5], true)
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        // 25th percentile of five points sits exactly on -0.25
        assert_eq!(result.var, -25.0);
        assert!(json.contains("\"tail_count\":1"));

        let back: VaRResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_display() {
        let result = VaRResult {
            var: -3.456,
            cvar: Some(-4.5),
            percentile: 95.0,
            tail_count: 50,
        };
        assert_eq!(result.to_string(), "VaR(95.00%): -3.46, CVaR: -4.50");
    }
}

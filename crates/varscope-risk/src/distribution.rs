//! Normal distribution estimate from an observed series.

use serde::{Deserialize, Serialize};
use varscope_math::statistics::{mean, sample_std_dev};

use crate::series::SampleSeries;
use crate::RiskError;

/// Sample mean and unbiased standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionEstimate {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Number of observations used
    pub observations: usize,
}

impl DistributionEstimate {
    /// Estimate from raw values.
    ///
    /// # Errors
    ///
    /// `InsufficientData` for fewer than two observations, where the sample
    /// standard deviation is undefined.
    pub fn from_values(values: &[f64]) -> Result<Self, RiskError> {
        if values.len() < 2 {
            return Err(RiskError::insufficient_data(
                "distribution estimate",
                2,
                values.len(),
            ));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::InvalidInput(
                "series contains non-finite values".to_string(),
            ));
        }

        Ok(Self {
            mean: mean(values)?,
            std_dev: sample_std_dev(values)?,
            observations: values.len(),
        })
    }

    /// Estimate from a derived series.
    pub fn from_series<S: SampleSeries + ?Sized>(series: &S) -> Result<Self, RiskError> {
        Self::from_values(&series.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ReturnSeries;
    use approx::assert_relative_eq;
    use varscope_core::{Date, PriceSeries};

    #[test]
    fn test_estimate_from_returns() {
        let prices = PriceSeries::from_closes(
            Date::from_ymd(2025, 1, 6).unwrap(),
            &[100.0, 102.0, 101.0, 105.0, 103.0, 108.0],
        )
        .unwrap();
        let returns = ReturnSeries::build(&prices, 1).unwrap();
        let est = DistributionEstimate::from_series(&returns).unwrap();

        assert_eq!(est.observations, 5);
        assert_relative_eq!(est.mean, 0.0159, epsilon = 1e-4);
        // Unbiased (n - 1) deviation of the five returns
        assert_relative_eq!(est.std_dev, 0.02969, epsilon = 1e-4);
    }

    #[test]
    fn test_single_observation_fails() {
        let err = DistributionEstimate::from_values(&[0.01]).unwrap_err();
        assert_eq!(
            err,
            RiskError::InsufficientData {
                context: "distribution estimate".to_string(),
                required: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(DistributionEstimate::from_values(&[0.01, f64::NAN]).is_err());
    }
}

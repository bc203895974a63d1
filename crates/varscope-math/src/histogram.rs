//! Equal-width histogram of a sample.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Equal-width binning of a numeric sample.
///
/// Bins are half-open `[lo, hi)` except the last, which also includes the
/// sample maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Left edge of the first bin (sample minimum).
    pub min: f64,
    /// Right edge of the last bin (sample maximum).
    pub max: f64,
    /// Width of every bin. Zero when all samples are equal.
    pub bin_width: f64,
    /// Observation count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `samples` into `bins` equal-width buckets spanning the sample range.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, zero bins, or non-finite samples.
    pub fn from_samples(samples: &[f64], bins: usize) -> MathResult<Self> {
        if bins == 0 {
            return Err(MathError::invalid_input("histogram needs at least one bin"));
        }
        if samples.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if let Some(index) = samples.iter().position(|v| !v.is_finite()) {
            return Err(MathError::NonFinite { index });
        }

        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &x in samples {
            let idx = if bin_width > 0.0 {
                (((x - min) / bin_width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }

        Ok(Self {
            min,
            max,
            bin_width,
            counts,
        })
    }

    /// Number of bins.
    #[must_use]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin edges, `bins + 1` values from `min` to `max`.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.bins())
            .map(|i| self.min + self.bin_width * i as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_counts() {
        let samples = [0.0, 0.1, 0.2, 0.5, 0.9, 1.0];
        let hist = Histogram::from_samples(&samples, 2).unwrap();
        assert_eq!(hist.counts, vec![3, 3]);
        assert_eq!(hist.total(), samples.len());
        assert_relative_eq!(hist.bin_width, 0.5);

        let edges = hist.edges();
        assert_eq!(edges.len(), 3);
        assert_relative_eq!(edges[2], 1.0);
    }

    #[test]
    fn test_histogram_degenerate_sample() {
        let hist = Histogram::from_samples(&[2.0, 2.0, 2.0], 50).unwrap();
        assert_eq!(hist.bins(), 50);
        assert_eq!(hist.counts[0], 3);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_errors() {
        assert!(Histogram::from_samples(&[], 10).is_err());
        assert!(Histogram::from_samples(&[1.0], 0).is_err());
        assert!(Histogram::from_samples(&[1.0, f64::INFINITY], 10).is_err());
    }
}

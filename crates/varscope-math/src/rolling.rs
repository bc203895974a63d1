//! Trailing-window statistics.
//!
//! Output element `k` summarizes `values[k..k + window]`, so the output has
//! `values.len() - window + 1` entries and the `window - 1` leading positions
//! that lack a full window are dropped rather than padded.

use crate::error::{MathError, MathResult};
use crate::statistics::sample_std_dev;

fn check_window(len: usize, window: usize) -> MathResult<()> {
    if window == 0 {
        return Err(MathError::invalid_input("window must be at least 1"));
    }
    if len < window {
        return Err(MathError::insufficient_data(window, len));
    }
    Ok(())
}

/// Trailing sum over `window` observations.
///
/// # Example
///
/// ```rust
/// use varscope_math::rolling::rolling_sum;
///
/// let sums = rolling_sum(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// assert_eq!(sums, vec![3.0, 5.0, 7.0]);
/// ```
pub fn rolling_sum(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    check_window(values.len(), window)?;

    let mut out = Vec::with_capacity(values.len() - window + 1);
    let mut acc: f64 = values[..window].iter().sum();
    out.push(acc);
    for k in window..values.len() {
        acc += values[k] - values[k - window];
        out.push(acc);
    }

    log::trace!("rolling_sum: {} values, window {}", values.len(), window);
    Ok(out)
}

/// Trailing unbiased sample standard deviation over `window` observations.
///
/// Each window is evaluated independently to avoid drift from a running
/// sum of squares.
///
/// # Errors
///
/// A window of 1 has no defined sample deviation and returns
/// `MathError::InsufficientData`.
pub fn rolling_std_dev(values: &[f64], window: usize) -> MathResult<Vec<f64>> {
    check_window(values.len(), window)?;
    if window < 2 {
        return Err(MathError::insufficient_data(2, window));
    }

    values.windows(window).map(sample_std_dev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_sum() {
        let sums = rolling_sum(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(sums, vec![6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_rolling_sum_window_one_is_identity() {
        let values = [0.5, 1.5, 2.5];
        assert_eq!(rolling_sum(&values, 1).unwrap(), values.to_vec());
    }

    #[test]
    fn test_rolling_sum_window_errors() {
        assert!(matches!(
            rolling_sum(&[1.0, 2.0], 0),
            Err(MathError::InvalidInput { .. })
        ));
        assert_eq!(
            rolling_sum(&[1.0, 2.0], 3),
            Err(MathError::InsufficientData {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rolling_std_dev() {
        let values = [1.0, 2.0, 4.0, 7.0];
        let stds = rolling_std_dev(&values, 2).unwrap();
        assert_eq!(stds.len(), 3);
        // std of two points = |a - b| / sqrt(2)
        assert_relative_eq!(stds[0], 1.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stds[1], 2.0 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(stds[2], 3.0 / 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_std_dev_window_one_undefined() {
        assert!(matches!(
            rolling_std_dev(&[1.0, 2.0, 3.0], 1),
            Err(MathError::InsufficientData { required: 2, .. })
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rolling_sum_matches_direct_sum(
                values in prop::collection::vec(-1_000.0f64..1_000.0, 1..60),
                window in 1usize..10,
            ) {
                prop_assume!(window <= values.len());
                let sums = rolling_sum(&values, window).unwrap();
                prop_assert_eq!(sums.len(), values.len() - window + 1);
                for (sum, chunk) in sums.iter().zip(values.windows(window)) {
                    let direct: f64 = chunk.iter().sum();
                    prop_assert!((sum - direct).abs() < 1e-6);
                }
            }

            #[test]
            fn rolling_std_dev_is_non_negative(
                values in prop::collection::vec(-10.0f64..10.0, 2..40),
                window in 2usize..8,
            ) {
                prop_assume!(window <= values.len());
                let stds = rolling_std_dev(&values, window).unwrap();
                prop_assert_eq!(stds.len(), values.len() - window + 1);
                prop_assert!(stds.iter().all(|s| *s >= 0.0));
            }
        }
    }
}

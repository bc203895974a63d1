//! Descriptive statistics over `f64` slices.

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty slice.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (divides by n - 1).
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for fewer than two values.
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let mu = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - mu).powi(2)).sum();
    Ok(sum_sq / (values.len() - 1) as f64)
}

/// Unbiased sample standard deviation.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `q` is expressed on the 0-100 scale. The rank of `q` is
/// `q / 100 * (n - 1)` on the sorted data; fractional ranks interpolate
/// between the two neighbouring order statistics.
///
/// # Errors
///
/// Returns an error for empty input, `q` outside `[0, 100]`, or NaN values.
///
/// # Example
///
/// ```rust
/// use varscope_math::statistics::percentile;
///
/// let p = percentile(&[1.0, 2.0, 3.0, 4.0], 50.0).unwrap();
/// assert!((p - 2.5).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], q: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "percentile {q} outside [0, 100]"
        )));
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(MathError::NonFinite { index });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

//! Sample statistics for Monte Carlo estimators.

use crate::types::{PricingError, PricingResult};

/// Arithmetic mean. Returns `NaN` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance around a precomputed mean.
///
/// Callers must ensure `values.len() >= 2`.
#[inline]
pub fn sample_variance(values: &[f64], mean: f64) -> f64 {
    let ss: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
    ss / (values.len() - 1) as f64
}

/// Mean and standard error `s / √n`, with `s` the Bessel-corrected deviation.
///
/// # Errors
///
/// Returns [`PricingError::InputValidation`] when fewer than two samples are given.
///
/// # Examples
///
/// ```rust
/// use mcop_core::math::mean_and_std_error;
///
/// let (mean, se) = mean_and_std_error(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(mean, 2.5);
/// assert!((se - (5.0_f64 / 3.0).sqrt() / 2.0).abs() < 1e-12);
/// ```
pub fn mean_and_std_error(values: &[f64]) -> PricingResult<(f64, f64)> {
    if values.len() < 2 {
        return Err(PricingError::invalid(
            "samples",
            format!("need at least 2 samples, got {}", values.len()),
        ));
    }
    let m = mean(values);
    let s = sample_variance(values, m).sqrt();
    Ok((m, s / (values.len() as f64).sqrt()))
}

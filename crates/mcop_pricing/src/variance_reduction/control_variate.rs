//! Control-variate adjustment.
//!
//! For a target series `x` and a control series `y` with known mean `E[y]`,
//! the adjusted series `x - β·(y - E[y])` has the same expectation as `x`
//! and strictly smaller variance whenever `x` and `y` are correlated. The
//! coefficient is estimated as `β = Cov(x, y) / Var(y)`.

use mcop_core::math::mean;
use mcop_core::types::{PricingError, PricingResult};
use tracing::debug;

/// Result of a control-variate adjustment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlVariateEstimate {
    /// Adjusted estimate of `E[x]`.
    pub mean: f64,
    /// Estimated optimal coefficient `Cov(x, y) / Var(y)`.
    pub beta: f64,
}

impl ControlVariateEstimate {
    /// The adjusted series `x - β·(y - E[y])`.
    pub fn adjusted_series(&self, x: &[f64], y: &[f64], y_true_mean: f64) -> Vec<f64> {
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| xi - self.beta * (yi - y_true_mean))
            .collect()
    }
}

/// Estimates `E[x]` using `y` as a control with known mean `y_true_mean`.
///
/// A zero-variance control is degenerate: the unadjusted mean is returned
/// with `β = 0`.
///
/// # Errors
///
/// Returns [`PricingError::InputValidation`] if `x` and `y` differ in length
/// or are empty.
///
/// # Examples
///
/// ```rust
/// use mcop_pricing::variance_reduction::control_variate_adjustment;
///
/// let y = [-1.0, 0.0, 1.0, 2.0];
/// let x = [-2.0, 0.0, 2.0, 4.0];
/// let cv = control_variate_adjustment(&x, &y, 0.0).unwrap();
/// assert!((cv.beta - 2.0).abs() < 1e-12);
/// assert!(cv.mean.abs() < 1e-12);
/// ```
pub fn control_variate_adjustment(
    x: &[f64],
    y: &[f64],
    y_true_mean: f64,
) -> PricingResult<ControlVariateEstimate> {
    if x.len() != y.len() {
        return Err(PricingError::invalid(
            "control",
            format!(
                "target and control must have the same length, got {} and {}",
                x.len(),
                y.len()
            ),
        ));
    }
    if x.is_empty() {
        return Err(PricingError::invalid("control", "series must not be empty"));
    }

    let x_mean = mean(x);
    let y_mean = mean(y);
    let n = x.len() as f64;

    let var_y = y.iter().map(|&v| (v - y_mean) * (v - y_mean)).sum::<f64>() / n;
    if var_y == 0.0 {
        debug!("zero-variance control series, skipping adjustment");
        return Ok(ControlVariateEstimate {
            mean: x_mean,
            beta: 0.0,
        });
    }

    let cov_xy = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum::<f64>()
        / n;
    let beta = cov_xy / var_y;

    let estimate = ControlVariateEstimate { mean: 0.0, beta };
    let adjusted = estimate.adjusted_series(x, y, y_true_mean);

    Ok(ControlVariateEstimate {
        mean: mean(&adjusted),
        beta,
    })
}

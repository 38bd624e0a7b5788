//! Discounted Monte Carlo mean estimator.

use mcop_core::math::{mean_and_std_error, Z_975};
use mcop_core::types::{PricingError, PricingResult};

/// Monte Carlo price estimate with standard error and 95% confidence interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEstimate {
    /// Sample mean of the discounted payoffs.
    pub price: f64,
    /// Standard error of the mean (Bessel-corrected).
    pub std_error: f64,
    /// Lower bound of the two-sided 95% confidence interval.
    pub ci_low: f64,
    /// Upper bound of the two-sided 95% confidence interval.
    pub ci_high: f64,
}

impl McEstimate {
    /// Builds an estimate from a mean and standard error using the normal approximation.
    #[inline]
    pub fn from_mean_and_error(price: f64, std_error: f64) -> Self {
        Self {
            price,
            std_error,
            ci_low: price - Z_975 * std_error,
            ci_high: price + Z_975 * std_error,
        }
    }

    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn half_width(&self) -> f64 {
        Z_975 * self.std_error
    }

    /// Returns `true` if `value` lies inside the confidence interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.ci_low <= value && value <= self.ci_high
    }
}

/// Discounts every payoff by `exp(-rate·maturity)` and returns the sample
/// mean with its standard error and 95% confidence interval.
///
/// # Errors
///
/// Returns [`PricingError::InputValidation`] if fewer than two payoffs are
/// given, or `rate`/`maturity` are not finite (maturity must also be
/// non-negative).
///
/// # Examples
///
/// ```rust
/// use mcop_pricing::variance_reduction::mc_price;
///
/// let estimate = mc_price(&[0.0, 10.0, 20.0], 0.0, 1.0).unwrap();
/// assert_eq!(estimate.price, 10.0);
/// assert!(estimate.contains(10.0));
/// ```
pub fn mc_price(payoffs: &[f64], rate: f64, maturity: f64) -> PricingResult<McEstimate> {
    if !rate.is_finite() {
        return Err(PricingError::invalid(
            "rate",
            format!("must be finite, got {}", rate),
        ));
    }
    if !(maturity.is_finite() && maturity >= 0.0) {
        return Err(PricingError::invalid(
            "maturity",
            format!("must be non-negative and finite, got {}", maturity),
        ));
    }

    let discount = (-rate * maturity).exp();
    let discounted: Vec<f64> = payoffs.iter().map(|&p| discount * p).collect();
    let (price, std_error) = mean_and_std_error(&discounted)?;

    Ok(McEstimate::from_mean_and_error(price, std_error))
}

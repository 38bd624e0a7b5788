//! Risk-neutral model parameters.
//!
//! [`ModelParameters`] is validated once at construction; every derived
//! quantity (time step, per-step drift, per-step discount factor) is a pure
//! function of it.

use super::error::{PricingError, PricingResult};

/// Parameters of the geometric Brownian motion under the risk-neutral measure.
///
/// # Model
///
/// ```text
/// dS = (r - q) S dt + σ S dW
/// ```
///
/// where:
/// - S is the spot price
/// - r is the continuously compounded risk-free rate
/// - q is the continuous dividend yield
/// - σ is the volatility
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::ModelParameters;
///
/// let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// assert_eq!(params.spot(), 100.0);
/// assert!((params.dt(100) - 0.01).abs() < 1e-15);
///
/// assert!(ModelParameters::new(100.0, 0.05, 0.0, -0.2, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelParameters {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    maturity: f64,
}

impl ModelParameters {
    /// Creates validated model parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Initial spot price (S₀), non-negative and finite; zero gives
    ///   a process that stays at zero
    /// * `rate` - Risk-free rate (annualised), finite
    /// * `dividend_yield` - Continuous dividend yield (annualised), finite
    /// * `volatility` - Volatility (annualised), non-negative and finite
    /// * `maturity` - Time to maturity in years, positive and finite
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] naming the first offending parameter.
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
        maturity: f64,
    ) -> PricingResult<Self> {
        if !(spot.is_finite() && spot >= 0.0) {
            return Err(PricingError::invalid(
                "spot",
                format!("must be non-negative and finite, got {}", spot),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid(
                "rate",
                format!("must be finite, got {}", rate),
            ));
        }
        if !dividend_yield.is_finite() {
            return Err(PricingError::invalid(
                "dividend_yield",
                format!("must be finite, got {}", dividend_yield),
            ));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(PricingError::invalid(
                "volatility",
                format!("must be non-negative and finite, got {}", volatility),
            ));
        }
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(PricingError::invalid(
                "maturity",
                format!("must be positive and finite, got {}", maturity),
            ));
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
            maturity,
        })
    }

    /// Initial spot price (S₀).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to maturity (T) in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Time step `Δt = T / n_steps`.
    #[inline]
    pub fn dt(&self, n_steps: usize) -> f64 {
        self.maturity / n_steps as f64
    }

    /// Deterministic part of the log-price increment, `(r - q - σ²/2)·Δt`.
    #[inline]
    pub fn log_drift(&self, dt: f64) -> f64 {
        (self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility) * dt
    }

    /// Diffusion scale of the log-price increment, `σ·√Δt`.
    #[inline]
    pub fn log_diffusion(&self, dt: f64) -> f64 {
        self.volatility * dt.sqrt()
    }

    /// One-step discount factor `exp(-r·Δt)`.
    #[inline]
    pub fn discount(&self, dt: f64) -> f64 {
        (-self.rate * dt).exp()
    }

    /// Discount factor to time zero from maturity, `exp(-r·T)`.
    #[inline]
    pub fn maturity_discount(&self) -> f64 {
        self.discount(self.maturity)
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            dividend_yield: 0.0,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

//! Black-Scholes closed form with continuous dividend yield.
//!
//! ## Formulas
//!
//! **Call**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! With σ = 0 the terminal spot is the deterministic forward
//! F = S·e^((r-q)T) and the price is the discounted intrinsic value of F.

use mcop_core::math::norm_cdf;
use mcop_core::types::{ModelParameters, OptionType, PricingError, PricingResult};

/// Black-Scholes model bound to a set of [`ModelParameters`].
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::ModelParameters;
/// use mcop_pricing::analytical::BlackScholes;
///
/// let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// let bs = BlackScholes::new(params);
///
/// let call = bs.price_call(100.0);
/// let put = bs.price_put(100.0);
///
/// // Put-call parity: C - P = S - K·exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholes {
    params: ModelParameters,
}

impl BlackScholes {
    /// Creates a model over validated parameters.
    #[inline]
    pub fn new(params: ModelParameters) -> Self {
        Self { params }
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Returns `(d₁, d₂)` for a strictly positive volatility.
    pub fn d1_d2(&self, strike: f64) -> (f64, f64) {
        let p = &self.params;
        let sigma_sqrt_t = p.volatility() * p.maturity().sqrt();
        let d1 = ((p.spot() / strike).ln()
            + (p.rate() - p.dividend_yield() + 0.5 * p.volatility() * p.volatility())
                * p.maturity())
            / sigma_sqrt_t;
        (d1, d1 - sigma_sqrt_t)
    }

    /// Forward price `S·e^((r-q)T)`.
    #[inline]
    pub fn forward(&self) -> f64 {
        let p = &self.params;
        p.spot() * ((p.rate() - p.dividend_yield()) * p.maturity()).exp()
    }

    /// European call price.
    pub fn price_call(&self, strike: f64) -> f64 {
        self.price(strike, OptionType::Call)
    }

    /// European put price.
    pub fn price_put(&self, strike: f64) -> f64 {
        self.price(strike, OptionType::Put)
    }

    /// European price for either option type.
    pub fn price(&self, strike: f64, option_type: OptionType) -> f64 {
        let p = &self.params;
        let df = p.maturity_discount();

        if p.volatility() == 0.0 {
            return df * option_type.payoff(self.forward(), strike);
        }

        let (d1, d2) = self.d1_d2(strike);
        let spot_df = p.spot() * (-p.dividend_yield() * p.maturity()).exp();
        match option_type {
            OptionType::Call => spot_df * norm_cdf(d1) - strike * df * norm_cdf(d2),
            OptionType::Put => strike * df * norm_cdf(-d2) - spot_df * norm_cdf(-d1),
        }
    }
}

/// Black-Scholes price of a European option.
///
/// # Errors
///
/// Returns [`PricingError::InputValidation`] if the strike is not positive
/// and finite.
pub fn black_scholes_price(
    params: &ModelParameters,
    strike: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::invalid(
            "strike",
            format!("must be positive and finite, got {}", strike),
        ));
    }
    Ok(BlackScholes::new(*params).price(strike, option_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn standard_params() -> ModelParameters {
        ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_reference_values() {
        let params = standard_params();
        let call = black_scholes_price(&params, 100.0, OptionType::Call).unwrap();
        let put = black_scholes_price(&params, 100.0, OptionType::Put).unwrap();

        assert_relative_eq!(call, 10.450_583_572_185_565, epsilon = 1e-4);
        assert_relative_eq!(put, 5.573_526_022_256_971, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity_with_dividend() {
        let params = ModelParameters::new(105.0, 0.03, 0.02, 0.25, 2.0).unwrap();
        let bs = BlackScholes::new(params);
        let strike = 95.0;

        let lhs = bs.price_call(strike) - bs.price_put(strike);
        let rhs = 105.0 * (-0.04_f64).exp() - strike * (-0.06_f64).exp();
        assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_volatility_is_discounted_forward_intrinsic() {
        let params = ModelParameters::new(100.0, 0.05, 0.0, 0.0, 1.0).unwrap();
        let bs = BlackScholes::new(params);
        let forward = 100.0 * 0.05_f64.exp();

        assert_relative_eq!(
            bs.price_call(100.0),
            (-0.05_f64).exp() * (forward - 100.0),
            epsilon = 1e-12
        );
        assert_eq!(bs.price_put(100.0), 0.0);
    }

    #[test]
    fn test_invalid_strike_rejected() {
        let params = standard_params();
        assert_eq!(
            black_scholes_price(&params, 0.0, OptionType::Call)
                .unwrap_err()
                .parameter(),
            Some("strike")
        );
    }
}

//! Cox-Ross-Rubinstein binomial lattice.

use mcop_core::types::{ExerciseStyle, ModelParameters, OptionType, PricingError, PricingResult};
use tracing::debug;

/// Up/down multipliers and risk-neutral probability of a CRR lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrrFactors {
    /// Up multiplier `exp(σ√Δt)`.
    pub up: f64,
    /// Down multiplier `1/u`.
    pub down: f64,
    /// Risk-neutral up probability `(exp((r-q)Δt) - d) / (u - d)`.
    pub probability: f64,
    /// One-step discount factor `exp(-r·Δt)`.
    pub discount: f64,
}

impl CrrFactors {
    /// Derives lattice factors for `n_steps` steps.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] if `n_steps` is zero, the
    /// volatility is zero, or the risk-neutral probability falls outside
    /// `[0, 1]` (time step too coarse for the rate and volatility).
    pub fn new(params: &ModelParameters, n_steps: usize) -> PricingResult<Self> {
        if n_steps == 0 {
            return Err(PricingError::invalid("n_steps", "must be positive"));
        }
        if params.volatility() <= 0.0 {
            return Err(PricingError::invalid(
                "volatility",
                "must be positive for a recombining lattice",
            ));
        }

        let dt = params.dt(n_steps);
        let up = (params.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((params.rate() - params.dividend_yield()) * dt).exp();
        let probability = (growth - down) / (up - down);

        if !(0.0..=1.0).contains(&probability) {
            return Err(PricingError::invalid(
                "risk_neutral_probability",
                format!(
                    "p = {} outside [0, 1]; increase n_steps or check rate and volatility",
                    probability
                ),
            ));
        }

        Ok(Self {
            up,
            down,
            probability,
            discount: params.discount(dt),
        })
    }
}

/// Prices a vanilla option on a CRR binomial lattice.
///
/// A single layer of `n_steps + 1` node values is rolled back in place. At
/// layer `i` only the first `i + 1` entries are live; node `j` has spot
/// `S₀·u^j·d^(i-j)`. American exercise compares the discounted expectation
/// against the immediate payoff at every node.
///
/// # Errors
///
/// See [`CrrFactors::new`]. The strike must be non-negative and finite.
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::{ExerciseStyle, ModelParameters, OptionType};
/// use mcop_pricing::lattice::price_binomial;
///
/// let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// let american = price_binomial(&params, 100.0, 500, OptionType::Put, ExerciseStyle::American).unwrap();
/// let european = price_binomial(&params, 100.0, 500, OptionType::Put, ExerciseStyle::European).unwrap();
///
/// assert!(american > european);
/// assert!((american - 6.09).abs() < 0.05);
/// ```
pub fn price_binomial(
    params: &ModelParameters,
    strike: f64,
    n_steps: usize,
    option_type: OptionType,
    style: ExerciseStyle,
) -> PricingResult<f64> {
    if !(strike.is_finite() && strike >= 0.0) {
        return Err(PricingError::invalid(
            "strike",
            format!("must be non-negative and finite, got {}", strike),
        ));
    }
    let CrrFactors {
        up,
        down,
        probability: p,
        discount,
    } = CrrFactors::new(params, n_steps)?;
    let spot = params.spot();
    let node_spot = |i: usize, j: usize| spot * up.powi(j as i32) * down.powi((i - j) as i32);

    let mut layer: Vec<f64> = (0..=n_steps)
        .map(|j| option_type.payoff(node_spot(n_steps, j), strike))
        .collect();

    for i in (0..n_steps).rev() {
        for j in 0..=i {
            let continuation = discount * (p * layer[j + 1] + (1.0 - p) * layer[j]);
            layer[j] = match style {
                ExerciseStyle::European => continuation,
                ExerciseStyle::American => {
                    continuation.max(option_type.payoff(node_spot(i, j), strike))
                }
            };
        }
    }

    let price = layer[0];
    debug!(n_steps, %option_type, %style, p, price, "binomial lattice priced");
    Ok(price)
}

/// American option on a CRR lattice.
#[inline]
pub fn american_option_crr(
    params: &ModelParameters,
    strike: f64,
    n_steps: usize,
    option_type: OptionType,
) -> PricingResult<f64> {
    price_binomial(params, strike, n_steps, option_type, ExerciseStyle::American)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::black_scholes_price;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn standard_params() -> ModelParameters {
        ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_factors() {
        let factors = CrrFactors::new(&standard_params(), 100).unwrap();
        assert_relative_eq!(factors.up, 0.02_f64.exp(), epsilon = 1e-15);
        assert_relative_eq!(factors.up * factors.down, 1.0, epsilon = 1e-15);
        assert!(factors.probability > 0.0 && factors.probability < 1.0);
    }

    #[test]
    fn test_one_step_european_call() {
        let params = standard_params();
        let factors = CrrFactors::new(&params, 1).unwrap();
        let price =
            price_binomial(&params, 100.0, 1, OptionType::Call, ExerciseStyle::European).unwrap();

        let expected = factors.discount * factors.probability * (100.0 * factors.up - 100.0);
        assert_relative_eq!(price, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_european_converges_to_black_scholes() {
        let params = standard_params();
        for option_type in [OptionType::Call, OptionType::Put] {
            let lattice =
                price_binomial(&params, 100.0, 500, option_type, ExerciseStyle::European).unwrap();
            let closed_form = black_scholes_price(&params, 100.0, option_type).unwrap();
            assert!(
                (lattice - closed_form).abs() < 0.02,
                "{}: lattice {} vs Black-Scholes {}",
                option_type,
                lattice,
                closed_form
            );
        }
    }

    #[test]
    fn test_american_call_without_dividend_equals_european() {
        let params = standard_params();
        let american = american_option_crr(&params, 100.0, 200, OptionType::Call).unwrap();
        let european =
            price_binomial(&params, 100.0, 200, OptionType::Call, ExerciseStyle::European)
                .unwrap();
        assert_relative_eq!(american, european, epsilon = 1e-10);
    }

    #[test]
    fn test_american_put_reference_value() {
        let price = american_option_crr(&standard_params(), 100.0, 500, OptionType::Put).unwrap();
        assert!((price - 6.09).abs() < 0.03, "price = {}", price);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = american_option_crr(&standard_params(), 100.0, 0, OptionType::Put).unwrap_err();
        assert_eq!(err.parameter(), Some("n_steps"));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let params = ModelParameters::new(100.0, 0.5, 0.0, 0.01, 1.0).unwrap();
        let err = american_option_crr(&params, 100.0, 1, OptionType::Put).unwrap_err();
        assert_eq!(err.parameter(), Some("risk_neutral_probability"));
    }

    #[test]
    fn test_zero_volatility_rejected() {
        let params = ModelParameters::new(100.0, 0.05, 0.0, 0.0, 1.0).unwrap();
        let err = american_option_crr(&params, 100.0, 10, OptionType::Put).unwrap_err();
        assert_eq!(err.parameter(), Some("volatility"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_american_dominates_european_and_intrinsic(
            spot in 50.0f64..150.0,
            strike in 50.0f64..150.0,
            vol in 0.1f64..0.5,
            rate in 0.0f64..0.08,
            is_call in any::<bool>(),
        ) {
            let params = ModelParameters::new(spot, rate, 0.0, vol, 1.0).unwrap();
            let option_type = OptionType::from_is_call(is_call);

            let american = price_binomial(&params, strike, 100, option_type, ExerciseStyle::American).unwrap();
            let european = price_binomial(&params, strike, 100, option_type, ExerciseStyle::European).unwrap();

            prop_assert!(american >= european - 1e-10);
            prop_assert!(american >= option_type.payoff(spot, strike) - 1e-10);
            prop_assert!(european >= 0.0);
        }
    }
}

//! Longstaff-Schwartz pricing configuration.

use mcop_core::math::LeastSquaresConfig;
use mcop_core::types::{OptionType, PricingError, PricingResult};

/// Contract terms and regression settings for pricing from pre-simulated paths.
///
/// Every [`AmericanPricer`](super::AmericanPricer) accepts the same
/// configuration, so engines are interchangeable.
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::OptionType;
/// use mcop_pricing::lsm::LsmConfig;
///
/// let config = LsmConfig::builder()
///     .strike(100.0)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_type(OptionType::Put)
///     .degree(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.degree(), 3);
/// assert_eq!(config.dividend_yield(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LsmConfig {
    strike: f64,
    rate: f64,
    maturity: f64,
    option_type: OptionType,
    degree: usize,
    dividend_yield: f64,
    regression: LeastSquaresConfig,
}

impl LsmConfig {
    /// Default polynomial degree of the continuation-value regression.
    pub const DEFAULT_DEGREE: usize = 2;

    /// Creates a builder.
    #[inline]
    pub fn builder() -> LsmConfigBuilder {
        LsmConfigBuilder::default()
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Risk-free rate used for discounting.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Highest power in the regression basis.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of regression basis columns (`degree + 1`).
    #[inline]
    pub fn n_basis(&self) -> usize {
        self.degree + 1
    }

    /// Continuous dividend yield of the simulated paths.
    ///
    /// Already reflected in the paths' drift; carried so every engine sees
    /// the full contract.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Rank tolerance of the regression solve.
    #[inline]
    pub fn regression(&self) -> LeastSquaresConfig {
        self.regression
    }

    /// Time step implied by `n_steps` intervals over the maturity.
    #[inline]
    pub fn dt(&self, n_steps: usize) -> f64 {
        self.maturity / n_steps as f64
    }

    /// One-step discount factor `exp(-r·Δt)`.
    #[inline]
    pub fn step_discount(&self, n_steps: usize) -> f64 {
        (-self.rate * self.dt(n_steps)).exp()
    }
}

/// Builder for [`LsmConfig`].
///
/// `strike`, `rate` and `maturity` are required. The option type defaults to
/// a put, the degree to [`LsmConfig::DEFAULT_DEGREE`] and the dividend yield
/// to zero.
#[derive(Clone, Debug, Default)]
pub struct LsmConfigBuilder {
    strike: Option<f64>,
    rate: Option<f64>,
    maturity: Option<f64>,
    option_type: Option<OptionType>,
    degree: Option<usize>,
    dividend_yield: Option<f64>,
    rcond: Option<f64>,
}

impl LsmConfigBuilder {
    /// Sets the strike price.
    #[inline]
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the maturity in years.
    #[inline]
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the option type.
    #[inline]
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the regression polynomial degree.
    #[inline]
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the relative singular-value cutoff of the regression solve.
    #[inline]
    pub fn rcond(mut self, rcond: f64) -> Self {
        self.rcond = Some(rcond);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] if a required field is
    /// missing, the strike is negative, the maturity is not positive, any
    /// value is not finite, or `degree + 1` overflows.
    pub fn build(self) -> PricingResult<LsmConfig> {
        let strike = self
            .strike
            .ok_or_else(|| PricingError::invalid("strike", "must be specified"))?;
        let rate = self
            .rate
            .ok_or_else(|| PricingError::invalid("rate", "must be specified"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| PricingError::invalid("maturity", "must be specified"))?;
        let dividend_yield = self.dividend_yield.unwrap_or(0.0);

        if !(strike.is_finite() && strike >= 0.0) {
            return Err(PricingError::invalid(
                "strike",
                format!("must be non-negative and finite, got {}", strike),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid(
                "rate",
                format!("must be finite, got {}", rate),
            ));
        }
        if !(maturity.is_finite() && maturity > 0.0) {
            return Err(PricingError::invalid(
                "maturity",
                format!("must be positive and finite, got {}", maturity),
            ));
        }
        if !dividend_yield.is_finite() {
            return Err(PricingError::invalid(
                "dividend_yield",
                format!("must be finite, got {}", dividend_yield),
            ));
        }
        if let Some(rcond) = self.rcond {
            if !(rcond.is_finite() && rcond >= 0.0) {
                return Err(PricingError::invalid(
                    "rcond",
                    format!("must be non-negative and finite, got {}", rcond),
                ));
            }
        }

        let degree = self.degree.unwrap_or(LsmConfig::DEFAULT_DEGREE);
        if degree.checked_add(1).is_none() {
            return Err(PricingError::invalid(
                "degree",
                format!("{} leaves no room for the intercept column", degree),
            ));
        }

        Ok(LsmConfig {
            strike,
            rate,
            maturity,
            option_type: self.option_type.unwrap_or(OptionType::Put),
            degree,
            dividend_yield,
            regression: LeastSquaresConfig { rcond: self.rcond },
        })
    }
}

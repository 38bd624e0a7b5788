//! Path simulation configuration.
//!
//! This module provides [`SimulationConfig`] and its builder. Parameters are
//! validated at build time, so a constructed configuration is always usable.

use mcop_core::types::{PricingError, PricingResult};

/// Path simulation configuration.
///
/// Immutable configuration specifying the simulation grid and random stream.
/// Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use mcop_pricing::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .antithetic(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert!(config.antithetic());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of time steps per path.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Whether the second half of the paths mirrors the first half's normals.
    antithetic: bool,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns `true` when antithetic variates are enabled.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] if `n_paths` or `n_steps` is zero.
    pub fn validate(&self) -> PricingResult<()> {
        if self.n_steps == 0 {
            return Err(PricingError::invalid("n_steps", "must be positive, got 0"));
        }
        if self.n_paths == 0 {
            return Err(PricingError::invalid("n_paths", "must be positive, got 0"));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    antithetic: bool,
}

impl SimulationConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed; `None` draws from entropy at simulation time.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables antithetic variates.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] if `n_paths` or `n_steps`
    /// is missing or zero.
    pub fn build(self) -> PricingResult<SimulationConfig> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::invalid("n_paths", "must be specified"))?;
        let n_steps = self
            .n_steps
            .ok_or_else(|| PricingError::invalid("n_steps", "must be specified"))?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            seed: self.seed,
            antithetic: self.antithetic,
        };

        config.validate()?;
        Ok(config)
    }
}

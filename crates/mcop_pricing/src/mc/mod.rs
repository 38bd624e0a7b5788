//! Monte Carlo path simulation.
//!
//! This module provides the path generator consumed by every pricer in the
//! crate, together with European payoff evaluation.
//!
//! # Architecture
//!
//! ```text
//! simulate_gbm_paths()
//! ├── SimulationConfig       (n_paths, n_steps, seed, antithetic)
//! ├── PricerRng / NormalSource (normals drawn once, up front)
//! └── evolve_gbm_paths()     (parallel over paths)
//!         └── PathMatrix     (n_paths × (n_steps + 1))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mcop_core::types::{ModelParameters, OptionType};
//! use mcop_pricing::mc::{european_payoffs, simulate_gbm_paths, SimulationConfig};
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
//! let config = SimulationConfig::builder()
//!     .n_paths(10_000)
//!     .n_steps(52)
//!     .seed(42)
//!     .antithetic(true)
//!     .build()
//!     .unwrap();
//!
//! let paths = simulate_gbm_paths(&params, &config).unwrap();
//! let payoffs = european_payoffs(&paths, 100.0, OptionType::Call);
//! assert_eq!(payoffs.len(), 10_000);
//! ```

pub mod config;
pub mod paths;
pub mod payoff;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use paths::{
    draw_standard_normals, evolve_gbm_paths, simulate_gbm_paths, simulate_gbm_paths_with,
    PathMatrix,
};
pub use payoff::{european_call, european_payoffs, european_put, payoffs_at_step};

//! Longstaff-Schwartz least-squares Monte Carlo for early-exercise options.
//!
//! Pricing runs on a [`PathMatrix`](crate::mc::PathMatrix) produced by the
//! path simulator. Two engines share the [`AmericanPricer`] contract:
//!
//! | Engine | Parallelism | Availability |
//! |--------|-------------|--------------|
//! | [`ReferenceLsmEngine`] | none | always |
//! | `ParallelLsmEngine` | across paths within a step | `accelerated` feature |
//!
//! # Examples
//!
//! ```rust
//! use mcop_core::types::{ModelParameters, OptionType};
//! use mcop_pricing::lsm::{EngineKind, LsmConfig};
//! use mcop_pricing::mc::{simulate_gbm_paths, SimulationConfig};
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
//! let sim = SimulationConfig::builder()
//!     .n_paths(2_000)
//!     .n_steps(25)
//!     .seed(1)
//!     .antithetic(true)
//!     .build()
//!     .unwrap();
//! let paths = simulate_gbm_paths(&params, &sim).unwrap();
//!
//! let config = LsmConfig::builder()
//!     .strike(100.0)
//!     .rate(0.05)
//!     .maturity(1.0)
//!     .option_type(OptionType::Put)
//!     .build()
//!     .unwrap();
//!
//! let engine = EngineKind::Reference.pricer().unwrap();
//! let output = engine.price_detailed(&paths, &config).unwrap();
//! assert_eq!(output.cashflows.len(), 2_000);
//! assert_eq!(output.diagnostics.len(), 24);
//! ```

pub mod config;
pub mod engine;
pub mod longstaff_schwartz;

pub use config::{LsmConfig, LsmConfigBuilder};
#[cfg(feature = "accelerated")]
pub use engine::ParallelLsmEngine;
pub use engine::{AmericanPricer, EngineKind, ReferenceLsmEngine};
pub use longstaff_schwartz::{
    price_american_lsm, price_american_lsm_detailed, LsmOutput, StepDiagnostics,
};

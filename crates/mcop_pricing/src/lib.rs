//! # mcop_pricing: early-exercise option pricing kernel
//!
//! Prices options under geometric Brownian motion with two independent
//! numerical methods:
//!
//! - [`lsm`]: Longstaff-Schwartz least-squares Monte Carlo over simulated
//!   paths, with a reference and a parallel engine behind one trait
//! - [`lattice`]: Cox-Ross-Rubinstein binomial lattice, used as the
//!   validation oracle for the Monte Carlo estimate
//!
//! Supporting modules:
//!
//! - [`rng`]: seedable, injectable normal-variate source
//! - [`mc`]: path simulator and European payoffs
//! - [`variance_reduction`]: discounted-mean estimator and control variates
//! - [`analytical`]: Black-Scholes closed form
//!
//! ## Pipeline
//!
//! ```text
//! ModelParameters + SimulationConfig
//!         │
//!         ▼
//!   simulate_gbm_paths ──► PathMatrix ──► AmericanPricer (LSM)  ──► price
//!                                   └──► european_payoffs ──► mc_price ──► McEstimate
//!
//! ModelParameters ──► price_binomial ──► reference price
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use mcop_core::types::{ModelParameters, OptionType};
//! use mcop_pricing::lattice::american_option_crr;
//! use mcop_pricing::lsm::{price_american_lsm, LsmConfig};
//! use mcop_pricing::mc::{simulate_gbm_paths, SimulationConfig};
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
//! let sim = SimulationConfig::builder()
//!     .n_paths(20_000)
//!     .n_steps(50)
//!     .seed(123)
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
//! let lsm = price_american_lsm(&paths, &config).unwrap();
//! let lattice = american_option_crr(&params, 100.0, 200, OptionType::Put).unwrap();
//!
//! assert!((lsm - lattice).abs() < 0.3);
//! ```
//!
//! ## Features
//!
//! - `accelerated` (default): compiles the parallel LSM engine
//! - `serde`: serialisation of result types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod lattice;
pub mod lsm;
pub mod mc;
pub mod rng;
pub mod variance_reduction;

pub use mcop_core::types::{ExerciseStyle, ModelParameters, OptionType, PricingError, PricingResult};

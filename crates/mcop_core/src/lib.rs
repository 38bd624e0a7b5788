//! # mcop_core: Foundation for Monte Carlo Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! mcop_core is the bottom layer of the workspace, providing:
//! - Validated risk-neutral model parameters (`types::params`)
//! - Call/put and exercise style types (`types::option`)
//! - The shared error taxonomy: `PricingError` (`types::error`)
//! - Polynomial basis expansion and minimum-norm least squares (`math`)
//! - Standard normal functions and sample statistics (`math`)
//!
//! Layer 1 has no dependencies on other mcop_* crates.
//!
//! ## Usage Examples
//!
//! ```rust
//! use mcop_core::math::{polynomial_basis, solve_least_squares, LeastSquaresConfig};
//! use mcop_core::types::{ModelParameters, OptionType};
//! use nalgebra::DVector;
//!
//! let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
//! assert_eq!(OptionType::Put.payoff(90.0, 100.0), 10.0);
//!
//! let spots = [90.0, 95.0, 100.0, 105.0];
//! let x = polynomial_basis(&spots, 1);
//! let y = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
//! let fit = solve_least_squares(&x, &y, LeastSquaresConfig::default()).unwrap();
//! assert!((fit.coefficients[1] - 0.2).abs() < 1e-10);
//! # let _ = params;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ModelParameters`, `OptionType`, `ExerciseStyle`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{ExerciseStyle, ModelParameters, OptionType, PricingError, PricingResult};

//! Binomial lattice pricing.
//!
//! The CRR lattice is independent of any simulated path and serves as the
//! reference value for the Longstaff-Schwartz estimator.

pub mod binomial;

pub use binomial::{american_option_crr, price_binomial, CrrFactors};

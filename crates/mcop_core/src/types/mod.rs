//! Core parameter, option and error types.
//!
//! This module provides:
//! - `params`: validated risk-neutral model parameters
//! - `option`: call/put and exercise style
//! - `error`: the shared [`PricingError`] taxonomy
//!
//! # Re-exports
//!
//! - [`ModelParameters`] from `params`
//! - [`OptionType`], [`ExerciseStyle`] from `option`
//! - [`PricingError`], [`PricingResult`] from `error`

pub mod error;
pub mod option;
pub mod params;

pub use error::{PricingError, PricingResult};
pub use option::{ExerciseStyle, OptionType};
pub use params::ModelParameters;

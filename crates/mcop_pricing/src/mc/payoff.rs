//! Payoff evaluation over simulated paths.

use mcop_core::types::OptionType;
use rayon::prelude::*;

use super::paths::PathMatrix;

/// Immediate exercise value of every path at `step`.
pub fn payoffs_at_step(
    paths: &PathMatrix,
    step: usize,
    strike: f64,
    option_type: OptionType,
) -> Vec<f64> {
    paths
        .as_slice()
        .par_chunks_exact(paths.n_cols())
        .map(|row| option_type.payoff(row[step], strike))
        .collect()
}

/// European payoff of every path, evaluated on the terminal column.
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::OptionType;
/// use mcop_pricing::mc::{european_payoffs, PathMatrix};
///
/// let paths = PathMatrix::from_rows(&[
///     vec![100.0, 90.0],
///     vec![100.0, 100.0],
///     vec![100.0, 110.0],
/// ]).unwrap();
///
/// assert_eq!(european_payoffs(&paths, 100.0, OptionType::Call), vec![0.0, 0.0, 10.0]);
/// assert_eq!(european_payoffs(&paths, 100.0, OptionType::Put), vec![10.0, 0.0, 0.0]);
/// ```
#[inline]
pub fn european_payoffs(paths: &PathMatrix, strike: f64, option_type: OptionType) -> Vec<f64> {
    payoffs_at_step(paths, paths.n_steps(), strike, option_type)
}

/// European call payoffs `max(S_T - K, 0)`.
#[inline]
pub fn european_call(paths: &PathMatrix, strike: f64) -> Vec<f64> {
    european_payoffs(paths, strike, OptionType::Call)
}

/// European put payoffs `max(K - S_T, 0)`.
#[inline]
pub fn european_put(paths: &PathMatrix, strike: f64) -> Vec<f64> {
    european_payoffs(paths, strike, OptionType::Put)
}

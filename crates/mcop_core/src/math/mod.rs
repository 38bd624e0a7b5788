//! Numerical building blocks shared by the pricers.
//!
//! - [`basis`]: polynomial basis expansion `[1, S, …, S^d]`
//! - [`least_squares`]: minimum-norm least squares via SVD
//! - [`distributions`]: standard normal CDF and the 97.5% quantile
//! - [`statistics`]: sample mean, variance and standard error

pub mod basis;
pub mod distributions;
pub mod least_squares;
pub mod statistics;

pub use basis::{evaluate_polynomial, polynomial_basis};
pub use distributions::{norm_cdf, Z_975};
pub use least_squares::{solve_least_squares, LeastSquaresConfig, LeastSquaresSolution};
pub use statistics::{mean, mean_and_std_error, sample_variance};

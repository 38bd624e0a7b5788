//! Analytical pricing formulas for European options.
//!
//! Used as the oracle for European Monte Carlo estimates and by the
//! `european` command of the CLI.

pub mod black_scholes;

pub use black_scholes::{black_scholes_price, BlackScholes};

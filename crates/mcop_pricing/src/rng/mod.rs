//! # Random Number Generation Infrastructure
//!
//! Random number generation for the path simulator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: generators are seedable; the seed is retained even
//!   when drawn from entropy
//! - **Injectability**: the simulator draws through the [`NormalSource`]
//!   trait, so tests can supply their own normals
//! - **Efficiency**: zero-allocation batch fills via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use mcop_pricing::rng::{NormalSource, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{NormalSource, PricerRng};

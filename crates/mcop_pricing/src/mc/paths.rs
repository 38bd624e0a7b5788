//! Path generation for Monte Carlo simulation.
//!
//! This module implements Geometric Brownian Motion (GBM) path generation
//! under the risk-neutral measure with a continuous dividend yield, using the
//! exact log-space transition:
//!
//! ```text
//! S(t+Δt) = S(t) × exp((r - q - σ²/2)Δt + σ√Δt × Z),   Z ~ N(0, 1)
//! ```
//!
//! Because this is the exact transition density of the process, no
//! discretisation bias accumulates across steps.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `paths[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.
//!
//! # Random Stream
//!
//! All normals are drawn up front from a single [`NormalSource`] before the
//! paths are evolved in parallel, so a fixed seed reproduces the same matrix
//! regardless of thread count.

use mcop_core::types::{ModelParameters, PricingError, PricingResult};
use rayon::prelude::*;
use tracing::debug;

use super::config::SimulationConfig;
use crate::rng::{NormalSource, PricerRng};

/// Dense matrix of simulated spot prices, `n_paths × (n_steps + 1)`.
///
/// Column 0 holds the initial spot for every path; column `t` holds the
/// simulated spot at time `t·Δt`. Entries are finite and non-negative.
///
/// # Examples
///
/// ```rust
/// use mcop_pricing::mc::PathMatrix;
///
/// let paths = PathMatrix::from_rows(&[
///     vec![100.0, 90.0],
///     vec![100.0, 110.0],
/// ]).unwrap();
///
/// assert_eq!(paths.n_paths(), 2);
/// assert_eq!(paths.n_steps(), 1);
/// assert_eq!(paths.terminal_prices(), vec![90.0, 110.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl PathMatrix {
    /// Wraps a row-major buffer of `n_paths × (n_steps + 1)` prices.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] if either dimension is zero,
    /// the buffer length does not match, or any entry is negative or not finite.
    pub fn from_vec(n_paths: usize, n_steps: usize, data: Vec<f64>) -> PricingResult<Self> {
        if n_paths == 0 {
            return Err(PricingError::invalid("n_paths", "must be positive, got 0"));
        }
        if n_steps == 0 {
            return Err(PricingError::invalid("n_steps", "must be positive, got 0"));
        }
        let expected = n_paths * (n_steps + 1);
        if data.len() != expected {
            return Err(PricingError::invalid(
                "paths",
                format!(
                    "expected {} entries for {} paths x {} columns, got {}",
                    expected,
                    n_paths,
                    n_steps + 1,
                    data.len()
                ),
            ));
        }
        if let Some(bad) = data.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(PricingError::invalid(
                "paths",
                format!("entries must be finite and non-negative, found {}", bad),
            ));
        }

        Ok(Self {
            data,
            n_paths,
            n_steps,
        })
    }

    /// Builds a matrix from per-path rows of equal length (at least two columns).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InputValidation`] for ragged or empty input, or
    /// entries that are negative or not finite.
    pub fn from_rows(rows: &[Vec<f64>]) -> PricingResult<Self> {
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        if n_cols < 2 {
            return Err(PricingError::invalid(
                "paths",
                format!("need at least 2 columns per path, got {}", n_cols),
            ));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(PricingError::invalid(
                "paths",
                format!("ragged rows: expected {} columns, found {}", n_cols, row.len()),
            ));
        }
        let data = rows.iter().flatten().copied().collect();
        Self::from_vec(rows.len(), n_cols - 1, data)
    }

    /// Number of simulated paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps; the matrix has `n_steps + 1` columns.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of columns, `n_steps + 1`.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_steps + 1
    }

    /// Row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The full trajectory of one path.
    #[inline]
    pub fn path(&self, path_idx: usize) -> &[f64] {
        let n_cols = self.n_cols();
        &self.data[path_idx * n_cols..(path_idx + 1) * n_cols]
    }

    /// Iterates over the trajectories in path order.
    #[inline]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.n_cols())
    }

    /// Spot price of `path_idx` at `step`.
    #[inline]
    pub fn get(&self, path_idx: usize, step: usize) -> f64 {
        self.data[path_idx * self.n_cols() + step]
    }

    /// Spot prices of every path at `step`.
    pub fn column(&self, step: usize) -> Vec<f64> {
        self.rows().map(|row| row[step]).collect()
    }

    /// Spot prices at maturity (last column).
    #[inline]
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.column(self.n_steps)
    }
}

/// Draws the standard normal matrix (`n_paths × n_steps`, row-major) that
/// drives the simulation.
///
/// With `antithetic`, only `⌈n_paths/2⌉` rows are drawn from `source`; row
/// `m + i` is the exact negation of row `i`, truncated to `n_paths` rows.
///
/// # Examples
///
/// ```rust
/// use mcop_pricing::mc::draw_standard_normals;
/// use mcop_pricing::rng::PricerRng;
///
/// let z = draw_standard_normals(&mut PricerRng::from_seed(1), 3, 2, true);
/// // rows: [z0, z1], [z2, z3], [-z0, -z1]
/// assert_eq!(z[4], -z[0]);
/// assert_eq!(z[5], -z[1]);
/// ```
pub fn draw_standard_normals<S: NormalSource + ?Sized>(
    source: &mut S,
    n_paths: usize,
    n_steps: usize,
    antithetic: bool,
) -> Vec<f64> {
    let independent = if antithetic {
        n_paths.div_ceil(2)
    } else {
        n_paths
    };

    let mut normals = vec![0.0; n_paths * n_steps];
    let (head, tail) = normals.split_at_mut(independent * n_steps);
    source.fill_normal(head);

    for (mirror, z) in tail.iter_mut().zip(head.iter()) {
        *mirror = -*z;
    }

    normals
}

/// Evolves GBM paths from a pre-drawn normal matrix.
///
/// `normals` must hold `config.n_paths() × config.n_steps()` values in
/// row-major order. Paths are evolved in parallel, one row per task.
pub fn evolve_gbm_paths(
    params: &ModelParameters,
    config: &SimulationConfig,
    normals: &[f64],
) -> PricingResult<PathMatrix> {
    let n_paths = config.n_paths();
    let n_steps = config.n_steps();
    if normals.len() != n_paths * n_steps {
        return Err(PricingError::invalid(
            "normals",
            format!(
                "expected {} draws for {} paths x {} steps, got {}",
                n_paths * n_steps,
                n_paths,
                n_steps,
                normals.len()
            ),
        ));
    }

    let dt = params.dt(n_steps);
    let drift_dt = params.log_drift(dt);
    let vol_sqrt_dt = params.log_diffusion(dt);
    let spot = params.spot();
    let n_cols = n_steps + 1;

    let mut data = vec![0.0; n_paths * n_cols];
    data.par_chunks_mut(n_cols)
        .zip(normals.par_chunks(n_steps))
        .for_each(|(path, z)| {
            path[0] = spot;
            for step in 0..n_steps {
                let increment = drift_dt + vol_sqrt_dt * z[step];
                path[step + 1] = path[step] * increment.exp();
            }
        });

    Ok(PathMatrix {
        data,
        n_paths,
        n_steps,
    })
}

/// Simulates GBM paths, drawing normals from `source`.
///
/// # Algorithm
///
/// 1. Draw the full normal matrix up front (antithetic mirroring applied)
/// 2. Precompute `drift_dt = (r - q - σ²/2)Δt` and `vol_sqrt_dt = σ√Δt`
/// 3. For each path in parallel, set S[0] = spot and
///    S[t+1] = S[t] × exp(drift_dt + vol_sqrt_dt × Z[t])
pub fn simulate_gbm_paths_with<S: NormalSource + ?Sized>(
    params: &ModelParameters,
    config: &SimulationConfig,
    source: &mut S,
) -> PricingResult<PathMatrix> {
    config.validate()?;
    let normals = draw_standard_normals(
        source,
        config.n_paths(),
        config.n_steps(),
        config.antithetic(),
    );
    evolve_gbm_paths(params, config, &normals)
}

/// Simulates GBM paths using the configuration's seed (entropy when unset).
///
/// Identical parameters and seed produce an identical [`PathMatrix`].
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::ModelParameters;
/// use mcop_pricing::mc::{simulate_gbm_paths, SimulationConfig};
///
/// let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// let config = SimulationConfig::builder()
///     .n_paths(1_000)
///     .n_steps(50)
///     .seed(7)
///     .antithetic(true)
///     .build()
///     .unwrap();
///
/// let paths = simulate_gbm_paths(&params, &config).unwrap();
/// assert!(paths.column(0).iter().all(|&s| s == 100.0));
/// ```
pub fn simulate_gbm_paths(
    params: &ModelParameters,
    config: &SimulationConfig,
) -> PricingResult<PathMatrix> {
    let mut rng = PricerRng::from_optional_seed(config.seed());
    debug!(
        n_paths = config.n_paths(),
        n_steps = config.n_steps(),
        antithetic = config.antithetic(),
        seed = rng.seed(),
        "simulating GBM paths"
    );
    simulate_gbm_paths_with(params, config, &mut rng)
}

//! Minimum-norm linear least squares.
//!
//! Solves `min ‖Xβ - y‖₂` through a singular value decomposition of `X`.
//! Singular values at or below `rcond · σ_max` are treated as zero, so a
//! rank-deficient design matrix (collinear basis columns, fewer rows than
//! columns) yields the minimum-norm solution instead of an error.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::types::{PricingError, PricingResult};

/// SVD sweep budget per row or column of the design matrix.
const MAX_SVD_ITERATIONS_PER_DIM: usize = 100;

/// Least-squares solve configuration.
///
/// `rcond` is the relative singular-value cutoff. `None` selects the
/// conventional default `ε_machine · max(rows, cols)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LeastSquaresConfig {
    /// Relative cutoff for small singular values.
    pub rcond: Option<f64>,
}

impl LeastSquaresConfig {
    /// Configuration with an explicit relative cutoff.
    #[inline]
    pub fn with_rcond(rcond: f64) -> Self {
        Self { rcond: Some(rcond) }
    }

    fn relative_cutoff(&self, rows: usize, cols: usize) -> f64 {
        self.rcond
            .unwrap_or(f64::EPSILON * rows.max(cols) as f64)
    }
}

/// Result of a least-squares solve.
#[derive(Clone, Debug, PartialEq)]
pub struct LeastSquaresSolution {
    /// Fitted coefficients, one per design column.
    pub coefficients: DVector<f64>,
    /// Effective numerical rank of the design matrix.
    pub rank: usize,
}

impl LeastSquaresSolution {
    /// Returns `true` when the design matrix had full column rank.
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.coefficients.len()
    }
}

/// Solves `min ‖Xβ - y‖₂`, returning the minimum-norm `β`.
///
/// # Errors
///
/// - [`PricingError::InputValidation`] if `x` and `y` have different row counts
///   or `rcond` is negative or not finite.
/// - [`PricingError::NumericalFailure`] if `x` or `y` holds a non-finite
///   entry (for instance a basis power that overflowed) or the SVD fails to
///   converge within its iteration budget.
///
/// # Examples
///
/// ```rust
/// use mcop_core::math::{solve_least_squares, LeastSquaresConfig};
/// use nalgebra::{DMatrix, DVector};
///
/// // Two identical columns: infinitely many exact solutions, minimum norm splits evenly.
/// let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
/// let y = DVector::from_vec(vec![2.0, 4.0, 6.0]);
///
/// let solution = solve_least_squares(&x, &y, LeastSquaresConfig::default()).unwrap();
/// assert_eq!(solution.rank, 1);
/// assert!((solution.coefficients[0] - 1.0).abs() < 1e-10);
/// assert!((solution.coefficients[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    config: LeastSquaresConfig,
) -> PricingResult<LeastSquaresSolution> {
    let (rows, cols) = x.shape();
    if rows != y.len() {
        return Err(PricingError::invalid(
            "design_matrix",
            format!(
                "row count {} does not match response length {}",
                rows,
                y.len()
            ),
        ));
    }
    if let Some(rcond) = config.rcond {
        if !(rcond.is_finite() && rcond >= 0.0) {
            return Err(PricingError::invalid(
                "rcond",
                format!("must be non-negative and finite, got {}", rcond),
            ));
        }
    }

    if rows == 0 || cols == 0 {
        return Ok(LeastSquaresSolution {
            coefficients: DVector::zeros(cols),
            rank: 0,
        });
    }

    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(PricingError::NumericalFailure(
            "least-squares system contains non-finite entries".to_string(),
        ));
    }

    let max_iterations = MAX_SVD_ITERATIONS_PER_DIM * rows.max(cols);
    let svd = x
        .clone()
        .try_svd(true, true, f64::EPSILON, max_iterations)
        .ok_or_else(|| PricingError::NumericalFailure("SVD did not converge".to_string()))?;

    let sigma_max = svd.singular_values.max();
    let cutoff = config.relative_cutoff(rows, cols) * sigma_max;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();

    if rank < cols {
        debug!(
            rows,
            cols,
            rank,
            "rank-deficient design matrix, using minimum-norm solution"
        );
    }

    let coefficients = svd
        .solve(y, cutoff)
        .map_err(|e| PricingError::NumericalFailure(e.to_string()))?;

    Ok(LeastSquaresSolution { coefficients, rank })
}

//! Polynomial basis expansion for regression design matrices.
//!
//! Maps a vector of spot prices `S` to the design matrix with columns
//! `[1, S, S², …, S^degree]`, row-aligned with the input.

use nalgebra::{DMatrix, DVector};

/// Builds the monomial design matrix `[1, S, S², …, S^degree]`.
///
/// The result has `spots.len()` rows and `degree + 1` columns. Powers are
/// accumulated by repeated multiplication, so row `i` column `k` is exactly
/// the product of `k` copies of `spots[i]`.
///
/// # Examples
///
/// ```rust
/// use mcop_core::math::polynomial_basis;
///
/// let x = polynomial_basis(&[2.0, 3.0], 2);
/// assert_eq!(x.shape(), (2, 3));
/// assert_eq!(x[(1, 2)], 9.0);
/// ```
pub fn polynomial_basis(spots: &[f64], degree: usize) -> DMatrix<f64> {
    let n_cols = degree + 1;
    DMatrix::from_fn(spots.len(), n_cols, |row, col| {
        let s = spots[row];
        let mut power = 1.0;
        for _ in 0..col {
            power *= s;
        }
        power
    })
}

/// Evaluates `Σ coefficients[k]·S^k` by Horner's method.
#[inline]
pub fn evaluate_polynomial(coefficients: &DVector<f64>, spot: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc.mul_add(spot, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_degree_zero_is_intercept_only() {
        let x = polynomial_basis(&[1.5, 2.5, 3.5], 0);
        assert_eq!(x.shape(), (3, 1));
        assert!(x.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_columns_are_increasing_powers() {
        let x = polynomial_basis(&[2.0, -1.0, 0.5], 3);
        assert_eq!(x.shape(), (3, 4));

        assert_eq!(x.row(0).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 4.0, 8.0]);
        assert_eq!(x.row(1).iter().copied().collect::<Vec<_>>(), vec![1.0, -1.0, 1.0, -1.0]);
        assert_eq!(x.row(2).iter().copied().collect::<Vec<_>>(), vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_empty_input_gives_empty_rows() {
        let x = polynomial_basis(&[], 2);
        assert_eq!(x.shape(), (0, 3));
    }

    #[test]
    fn test_evaluate_polynomial_matches_design_row() {
        let coefficients = DVector::from_vec(vec![1.0, -2.0, 0.5]);
        let spot = 3.0;
        let x = polynomial_basis(&[spot], 2);
        let direct = (x * &coefficients)[0];

        assert_relative_eq!(evaluate_polynomial(&coefficients, spot), direct, epsilon = 1e-12);
        assert_relative_eq!(direct, 1.0 - 6.0 + 4.5, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_shape_and_powers(
            spots in proptest::collection::vec(0.1f64..200.0, 0..32),
            degree in 0usize..6,
        ) {
            let x = polynomial_basis(&spots, degree);
            prop_assert_eq!(x.nrows(), spots.len());
            prop_assert_eq!(x.ncols(), degree + 1);

            for (row, &s) in spots.iter().enumerate() {
                prop_assert_eq!(x[(row, 0)], 1.0);
                for col in 1..=degree {
                    let expected = s.powi(col as i32);
                    prop_assert!((x[(row, col)] - expected).abs() <= 1e-9 * expected.abs().max(1.0));
                }
            }
        }
    }
}

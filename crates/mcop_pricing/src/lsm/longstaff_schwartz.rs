//! Longstaff-Schwartz backward induction (reference engine).
//!
//! # Algorithm
//!
//! ```text
//! cashflow[i]  = payoff(S[i, N])          exercise[i] = N
//! for t = N-1 down to 1:
//!     cashflow *= exp(-r·Δt)
//!     I  = { i : payoff(S[i, t]) > 0 }    (in-the-money index set)
//!     β  = argmin ‖X(S[I, t])·β - cashflow[I]‖   (X = [1, S, …, S^d])
//!     for i in I with payoff(S[i, t]) > X(S[i, t])·β:
//!         cashflow[i] = payoff(S[i, t])   exercise[i] = t
//! cashflow *= exp(-r·Δt)
//! price = mean(cashflow)
//! ```
//!
//! Time 0 is never an exercise date. The regression only ever sees the
//! in-the-money paths of the current step.

use mcop_core::math::{
    evaluate_polynomial, mean, polynomial_basis, solve_least_squares, LeastSquaresSolution,
};
use mcop_core::types::PricingResult;
use nalgebra::DVector;
use tracing::{debug, trace};

use super::config::LsmConfig;
use crate::mc::{payoffs_at_step, PathMatrix};

/// Regression summary for a single backward-induction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepDiagnostics {
    /// Time index of the step.
    pub step: usize,
    /// Number of in-the-money paths at this step.
    pub itm_paths: usize,
    /// Number of paths that chose to exercise at this step.
    pub exercised_paths: usize,
    /// Numerical rank of the regression design, `None` if no regression ran.
    pub regression_rank: Option<usize>,
}

/// Full output of a Longstaff-Schwartz run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LsmOutput {
    /// Mean of the time-0 discounted cashflows.
    pub price: f64,
    /// Per-path cashflow discounted to time 0.
    pub cashflows: Vec<f64>,
    /// Per-path step index at which the path exercises (`n_steps` if held to expiry).
    pub exercise_steps: Vec<usize>,
    /// Per-step regression diagnostics, latest step first.
    pub diagnostics: Vec<StepDiagnostics>,
    /// Number of time steps of the priced paths.
    pub n_steps: usize,
}

impl LsmOutput {
    /// Number of paths exercised strictly before expiry.
    pub fn early_exercise_count(&self) -> usize {
        self.exercise_steps
            .iter()
            .filter(|&&s| s < self.n_steps)
            .count()
    }
}

/// Prices an American option from pre-simulated paths.
///
/// # Errors
///
/// Returns [`PricingError::NumericalFailure`](mcop_core::PricingError::NumericalFailure)
/// if a regression solve fails to converge.
///
/// # Examples
///
/// ```rust
/// use mcop_core::types::{ModelParameters, OptionType};
/// use mcop_pricing::lsm::{price_american_lsm, LsmConfig};
/// use mcop_pricing::mc::{simulate_gbm_paths, SimulationConfig};
///
/// let params = ModelParameters::new(100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
/// let sim = SimulationConfig::builder()
///     .n_paths(5_000)
///     .n_steps(50)
///     .seed(123)
///     .antithetic(true)
///     .build()
///     .unwrap();
/// let paths = simulate_gbm_paths(&params, &sim).unwrap();
///
/// let config = LsmConfig::builder()
///     .strike(100.0)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_type(OptionType::Put)
///     .build()
///     .unwrap();
///
/// let price = price_american_lsm(&paths, &config).unwrap();
/// assert!(price > 5.0 && price < 7.5);
/// ```
#[inline]
pub fn price_american_lsm(paths: &PathMatrix, config: &LsmConfig) -> PricingResult<f64> {
    price_american_lsm_detailed(paths, config).map(|output| output.price)
}

/// Prices an American option, returning the per-path cashflows, exercise
/// steps and per-step regression diagnostics alongside the price.
///
/// # Errors
///
/// As [`price_american_lsm`].
pub fn price_american_lsm_detailed(
    paths: &PathMatrix,
    config: &LsmConfig,
) -> PricingResult<LsmOutput> {
    let n_steps = paths.n_steps();
    let discount = config.step_discount(n_steps);
    let strike = config.strike();
    let option_type = config.option_type();

    let mut cashflows = payoffs_at_step(paths, n_steps, strike, option_type);
    let mut exercise_steps = vec![n_steps; paths.n_paths()];
    let mut diagnostics = Vec::with_capacity(n_steps.saturating_sub(1));

    for step in (1..n_steps).rev() {
        for cashflow in cashflows.iter_mut() {
            *cashflow *= discount;
        }

        let mut itm = Vec::new();
        let mut spots = Vec::new();
        let mut exercise_values = Vec::new();
        for (path_idx, row) in paths.rows().enumerate() {
            let value = option_type.payoff(row[step], strike);
            if value > 0.0 {
                itm.push(path_idx);
                spots.push(row[step]);
                exercise_values.push(value);
            }
        }

        if itm.is_empty() {
            trace!(step, itm = 0, "no in-the-money paths");
            diagnostics.push(StepDiagnostics {
                step,
                itm_paths: 0,
                exercised_paths: 0,
                regression_rank: None,
            });
            continue;
        }

        let design = polynomial_basis(&spots, config.degree());
        let response = DVector::from_iterator(itm.len(), itm.iter().map(|&i| cashflows[i]));
        let LeastSquaresSolution { coefficients, rank } =
            solve_least_squares(&design, &response, config.regression())?;

        let mut exercised = 0;
        for ((&path_idx, &spot), &immediate) in itm.iter().zip(&spots).zip(&exercise_values) {
            let continuation = evaluate_polynomial(&coefficients, spot);
            if immediate > continuation {
                cashflows[path_idx] = immediate;
                exercise_steps[path_idx] = step;
                exercised += 1;
            }
        }

        trace!(step, itm = itm.len(), exercised, rank, "regression step");
        diagnostics.push(StepDiagnostics {
            step,
            itm_paths: itm.len(),
            exercised_paths: exercised,
            regression_rank: Some(rank),
        });
    }

    for cashflow in cashflows.iter_mut() {
        *cashflow *= discount;
    }
    let price = mean(&cashflows);

    debug!(
        engine = "reference",
        n_paths = paths.n_paths(),
        n_steps,
        degree = config.degree(),
        price,
        "LSM pricing complete"
    );

    Ok(LsmOutput {
        price,
        cashflows,
        exercise_steps,
        diagnostics,
        n_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mcop_core::types::{OptionType, PricingError};

    fn put_config(strike: f64, rate: f64) -> LsmConfig {
        LsmConfig::builder()
            .strike(strike)
            .rate(rate)
            .maturity(1.0)
            .option_type(OptionType::Put)
            .degree(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_step_is_discounted_european() {
        let paths = PathMatrix::from_rows(&[vec![100.0, 90.0], vec![100.0, 105.0]]).unwrap();
        let config = put_config(100.0, 0.05);

        let output = price_american_lsm_detailed(&paths, &config).unwrap();
        let df = (-0.05_f64).exp();

        assert_relative_eq!(output.price, 0.5 * 10.0 * df, epsilon = 1e-12);
        assert_eq!(output.exercise_steps, vec![1, 1]);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_no_itm_paths_still_discounts() {
        // Put struck at 50: never in the money before expiry, pays 5 on path 0 at expiry.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 80.0, 60.0, 45.0],
            vec![100.0, 120.0, 130.0, 140.0],
        ])
        .unwrap();
        let config = put_config(50.0, 0.06);

        let output = price_american_lsm_detailed(&paths, &config).unwrap();
        let df_total = (-0.06_f64).exp();

        assert_relative_eq!(output.cashflows[0], 5.0 * df_total, epsilon = 1e-12);
        assert_eq!(output.cashflows[1], 0.0);
        assert_relative_eq!(output.price, 2.5 * df_total, epsilon = 1e-12);
        assert_eq!(output.diagnostics.len(), 2);
        assert!(output.diagnostics.iter().all(|d| d.itm_paths == 0));
        assert_eq!(output.early_exercise_count(), 0);
    }

    #[test]
    fn test_deep_itm_path_exercises_early() {
        // Path 0 crashes then recovers; with a zero rate and a flat fit through
        // the other in-the-money path, immediate exercise beats continuation.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 10.0, 120.0],
            vec![100.0, 95.0, 96.0],
        ])
        .unwrap();
        let config = LsmConfig::builder()
            .strike(100.0)
            .rate(0.0)
            .maturity(1.0)
            .option_type(OptionType::Put)
            .degree(0)
            .build()
            .unwrap();

        let output = price_american_lsm_detailed(&paths, &config).unwrap();

        // Degree 0 fits the mean continuation (0 + 4) / 2 = 2.
        // Path 0: 90 > 2, exercises. Path 1: 5 > 2, exercises.
        assert_eq!(output.exercise_steps, vec![1, 1]);
        assert_relative_eq!(output.cashflows[0], 90.0, epsilon = 1e-12);
        assert_relative_eq!(output.cashflows[1], 5.0, epsilon = 1e-12);
        assert_relative_eq!(output.price, 47.5, epsilon = 1e-12);
        assert_eq!(output.early_exercise_count(), 2);
        assert_eq!(output.diagnostics[0].exercised_paths, 2);
        assert_eq!(output.diagnostics[0].regression_rank, Some(1));
    }

    #[test]
    fn test_holds_when_continuation_exceeds_exercise() {
        // Both paths are 10 in the money at step 1 but finish 20 in the money.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 90.0, 80.0],
            vec![100.0, 90.0, 80.0],
        ])
        .unwrap();
        let config = LsmConfig::builder()
            .strike(100.0)
            .rate(0.0)
            .maturity(1.0)
            .option_type(OptionType::Put)
            .degree(1)
            .build()
            .unwrap();

        let output = price_american_lsm_detailed(&paths, &config).unwrap();
        assert_eq!(output.exercise_steps, vec![2, 2]);
        assert_eq!(output.diagnostics[0].itm_paths, 2);
        assert_eq!(output.diagnostics[0].exercised_paths, 0);
        assert_relative_eq!(output.price, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_price_matches_detailed() {
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 92.0, 88.0, 95.0],
            vec![100.0, 104.0, 97.0, 91.0],
            vec![100.0, 99.0, 101.0, 110.0],
            vec![100.0, 85.0, 80.0, 84.0],
        ])
        .unwrap();
        let config = put_config(100.0, 0.03);

        let price = price_american_lsm(&paths, &config).unwrap();
        let detailed = price_american_lsm_detailed(&paths, &config).unwrap();
        assert_eq!(price, detailed.price);
        assert_relative_eq!(price, mean(&detailed.cashflows), epsilon = 1e-12);
        assert_eq!(detailed.diagnostics.iter().map(|d| d.step).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn test_cashflows_bounded_by_best_intrinsic() {
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 80.0, 70.0],
            vec![100.0, 90.0, 95.0],
            vec![100.0, 110.0, 120.0],
        ])
        .unwrap();
        let config = put_config(100.0, 0.05);
        let output = price_american_lsm_detailed(&paths, &config).unwrap();

        for (cashflow, row) in output.cashflows.iter().zip(paths.rows()) {
            assert!(*cashflow >= 0.0);
            assert!(*cashflow <= 100.0 - row.iter().cloned().fold(f64::INFINITY, f64::min) + 1e-12);
        }
    }

    fn zero_rate_put(degree: usize) -> LsmConfig {
        LsmConfig::builder()
            .strike(100.0)
            .rate(0.0)
            .maturity(1.0)
            .option_type(OptionType::Put)
            .degree(degree)
            .build()
            .unwrap()
    }

    #[test]
    fn test_regression_uses_in_the_money_paths_only() {
        // At step 1 paths 0 and 1 are in the money with continuations 0 and 30;
        // paths 2 and 3 are out of the money and finish worthless.
        // In-the-money fit: mean(0, 30) = 15, so neither 10 nor 5 exercises.
        // Fitting all four paths would give 7.5 and path 0 would exercise at 10.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 90.0, 100.0],
            vec![100.0, 95.0, 70.0],
            vec![100.0, 120.0, 110.0],
            vec![100.0, 130.0, 105.0],
        ])
        .unwrap();

        let output = price_american_lsm_detailed(&paths, &zero_rate_put(0)).unwrap();

        assert_eq!(output.exercise_steps, vec![2, 2, 2, 2]);
        assert_eq!(output.cashflows, vec![0.0, 30.0, 0.0, 0.0]);
        assert_relative_eq!(output.price, 7.5, epsilon = 1e-12);
        assert_eq!(output.diagnostics[0].itm_paths, 2);
        assert_eq!(output.diagnostics[0].exercised_paths, 0);
    }

    #[test]
    fn test_exercise_requires_strict_improvement() {
        // A single in-the-money path: the degree-0 fit reproduces its own
        // continuation of 10, equal to the immediate payoff of 10.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 90.0, 90.0],
            vec![100.0, 110.0, 120.0],
        ])
        .unwrap();

        let output = price_american_lsm_detailed(&paths, &zero_rate_put(0)).unwrap();

        assert_eq!(output.exercise_steps, vec![2, 2]);
        assert_eq!(output.diagnostics[0].itm_paths, 1);
        assert_eq!(output.diagnostics[0].exercised_paths, 0);
        assert_eq!(output.early_exercise_count(), 0);
        assert_relative_eq!(output.cashflows[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(output.price, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overflowing_basis_fails_instead_of_hanging() {
        // 90^200 exceeds f64::MAX, so the design matrix holds infinities.
        let paths = PathMatrix::from_rows(&[
            vec![100.0, 89.0, 92.0],
            vec![100.0, 90.0, 95.0],
            vec![100.0, 91.0, 88.0],
            vec![100.0, 88.0, 93.0],
        ])
        .unwrap();

        let err = price_american_lsm(&paths, &zero_rate_put(200)).unwrap_err();
        assert!(matches!(err, PricingError::NumericalFailure(_)), "{}", err);
    }
}

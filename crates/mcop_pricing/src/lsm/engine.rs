//! Interchangeable American-option engines over pre-simulated paths.
//!
//! Every engine implements [`AmericanPricer`] with the same contract: the
//! same [`PathMatrix`] and [`LsmConfig`] must give prices that agree within
//! Monte Carlo tolerance. Engines are selected at the boundary through
//! [`EngineKind`], never inside the algorithm.

use std::fmt;
use std::str::FromStr;

use mcop_core::types::{PricingError, PricingResult};

use super::config::LsmConfig;
use super::longstaff_schwartz::{price_american_lsm_detailed, LsmOutput};
use crate::mc::PathMatrix;

/// Prices an American option from pre-simulated paths.
pub trait AmericanPricer {
    /// Short engine identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Runs backward induction and returns the full output.
    fn price_detailed(&self, paths: &PathMatrix, config: &LsmConfig) -> PricingResult<LsmOutput>;

    /// Runs backward induction and returns the price only.
    fn price(&self, paths: &PathMatrix, config: &LsmConfig) -> PricingResult<f64> {
        self.price_detailed(paths, config).map(|output| output.price)
    }
}

/// Sequential Longstaff-Schwartz engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceLsmEngine;

impl AmericanPricer for ReferenceLsmEngine {
    fn name(&self) -> &'static str {
        EngineKind::Reference.as_str()
    }

    fn price_detailed(&self, paths: &PathMatrix, config: &LsmConfig) -> PricingResult<LsmOutput> {
        price_american_lsm_detailed(paths, config)
    }
}

#[cfg(feature = "accelerated")]
pub use accelerated::ParallelLsmEngine;

#[cfg(feature = "accelerated")]
mod accelerated {
    use mcop_core::math::{evaluate_polynomial, mean, polynomial_basis, solve_least_squares};
    use mcop_core::types::PricingResult;
    use nalgebra::DVector;
    use rayon::prelude::*;
    use tracing::{debug, trace};

    use super::{AmericanPricer, EngineKind};
    use crate::lsm::config::LsmConfig;
    use crate::lsm::longstaff_schwartz::{LsmOutput, StepDiagnostics};
    use crate::mc::{payoffs_at_step, PathMatrix};

    /// Longstaff-Schwartz engine parallelised across paths within each step.
    ///
    /// Steps still run strictly backward in time. A step with fewer
    /// in-the-money paths than basis columns skips the regression and keeps
    /// every path's continuation cashflow.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ParallelLsmEngine;

    impl AmericanPricer for ParallelLsmEngine {
        fn name(&self) -> &'static str {
            EngineKind::Accelerated.as_str()
        }

        fn price_detailed(
            &self,
            paths: &PathMatrix,
            config: &LsmConfig,
        ) -> PricingResult<LsmOutput> {
            let n_steps = paths.n_steps();
            let n_cols = paths.n_cols();
            let discount = config.step_discount(n_steps);
            let strike = config.strike();
            let option_type = config.option_type();

            let mut cashflows = payoffs_at_step(paths, n_steps, strike, option_type);
            let mut exercise_steps = vec![n_steps; paths.n_paths()];
            let mut diagnostics = Vec::with_capacity(n_steps.saturating_sub(1));

            for step in (1..n_steps).rev() {
                cashflows.par_iter_mut().for_each(|c| *c *= discount);

                // (path index, spot, immediate payoff), in path order
                let itm: Vec<(usize, f64, f64)> = paths
                    .as_slice()
                    .par_chunks_exact(n_cols)
                    .enumerate()
                    .filter_map(|(path_idx, row)| {
                        let spot = row[step];
                        let value = option_type.payoff(spot, strike);
                        (value > 0.0).then_some((path_idx, spot, value))
                    })
                    .collect();

                if itm.len() < config.n_basis() {
                    trace!(step, itm = itm.len(), "too few in-the-money paths, regression skipped");
                    diagnostics.push(StepDiagnostics {
                        step,
                        itm_paths: itm.len(),
                        exercised_paths: 0,
                        regression_rank: None,
                    });
                    continue;
                }

                let spots: Vec<f64> = itm.iter().map(|&(_, spot, _)| spot).collect();
                let design = polynomial_basis(&spots, config.degree());
                let response =
                    DVector::from_iterator(itm.len(), itm.iter().map(|&(i, _, _)| cashflows[i]));
                let fit = solve_least_squares(&design, &response, config.regression())?;

                let exercising: Vec<(usize, f64)> = itm
                    .par_iter()
                    .filter_map(|&(path_idx, spot, immediate)| {
                        let continuation = evaluate_polynomial(&fit.coefficients, spot);
                        (immediate > continuation).then_some((path_idx, immediate))
                    })
                    .collect();

                for &(path_idx, immediate) in &exercising {
                    cashflows[path_idx] = immediate;
                    exercise_steps[path_idx] = step;
                }

                trace!(
                    step,
                    itm = itm.len(),
                    exercised = exercising.len(),
                    rank = fit.rank,
                    "regression step"
                );
                diagnostics.push(StepDiagnostics {
                    step,
                    itm_paths: itm.len(),
                    exercised_paths: exercising.len(),
                    regression_rank: Some(fit.rank),
                });
            }

            cashflows.par_iter_mut().for_each(|c| *c *= discount);
            let price = mean(&cashflows);

            debug!(
                engine = "accelerated",
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
    }
}

/// Engine selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EngineKind {
    /// [`ReferenceLsmEngine`].
    #[default]
    Reference,
    /// Parallel engine, available with the `accelerated` feature.
    Accelerated,
}

impl EngineKind {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Reference => "reference",
            EngineKind::Accelerated => "accelerated",
        }
    }

    /// Returns `true` if this engine was compiled in.
    pub fn is_available(self) -> bool {
        match self {
            EngineKind::Reference => true,
            EngineKind::Accelerated => cfg!(feature = "accelerated"),
        }
    }

    /// Instantiates the selected engine.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::EngineUnavailable`] if the accelerated engine
    /// was not compiled in. The error names the reference engine as the
    /// fallback; no silent substitution takes place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mcop_pricing::lsm::EngineKind;
    ///
    /// let engine = EngineKind::Reference.pricer().unwrap();
    /// assert_eq!(engine.name(), "reference");
    /// ```
    pub fn pricer(self) -> PricingResult<Box<dyn AmericanPricer + Send + Sync>> {
        match self {
            EngineKind::Reference => Ok(Box::new(ReferenceLsmEngine)),
            #[cfg(feature = "accelerated")]
            EngineKind::Accelerated => Ok(Box::new(ParallelLsmEngine)),
            #[cfg(not(feature = "accelerated"))]
            EngineKind::Accelerated => Err(PricingError::EngineUnavailable {
                engine: EngineKind::Accelerated.as_str(),
                fallback: EngineKind::Reference.as_str(),
            }),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" => Ok(EngineKind::Reference),
            "accelerated" | "parallel" => Ok(EngineKind::Accelerated),
            other => Err(PricingError::invalid(
                "engine",
                format!(
                    "unknown engine '{}', expected 'reference' or 'accelerated'",
                    other
                ),
            )),
        }
    }
}

//! Error types for structured error handling.
//!
//! This module provides [`PricingError`], the single error type shared by the
//! simulator, the pricers and the estimators. The taxonomy is small:
//!
//! - `InputValidation`: a parameter violates a documented constraint. Always
//!   fails fast and names the offending parameter.
//! - `EngineUnavailable`: a pricing engine was requested that is not compiled
//!   into this build. Carries the engine to use instead.
//! - `NumericalFailure`: a numerical routine could not produce any answer.
//!
//! Numerically degenerate but recoverable situations (rank-deficient
//! regressions, zero-variance control series) are *not* errors; each has a
//! defined fallback in the routine that detects it.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Examples
/// ```
/// use mcop_core::types::PricingError;
///
/// let err = PricingError::invalid("n_steps", "must be positive");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid input 'n_steps': must be positive"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// A parameter violates a documented constraint.
    #[error("Invalid input '{parameter}': {reason}")]
    InputValidation {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The requested pricing engine is not available in this build.
    #[error("Engine '{engine}' is not available in this build; use the '{fallback}' engine instead")]
    EngineUnavailable {
        /// Engine that was requested.
        engine: &'static str,
        /// Engine that can be used instead.
        fallback: &'static str,
    },

    /// A numerical routine failed to produce a result.
    #[error("Numerical failure: {0}")]
    NumericalFailure(String),
}

impl PricingError {
    /// Shorthand for an [`InputValidation`](PricingError::InputValidation) error.
    #[inline]
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InputValidation {
            parameter,
            reason: reason.into(),
        }
    }

    /// Returns `true` for input validation failures.
    #[inline]
    pub fn is_input_validation(&self) -> bool {
        matches!(self, PricingError::InputValidation { .. })
    }

    /// Returns the name of the offending parameter for validation failures.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            PricingError::InputValidation { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

/// Result alias used throughout the workspace.
pub type PricingResult<T> = Result<T, PricingError>;

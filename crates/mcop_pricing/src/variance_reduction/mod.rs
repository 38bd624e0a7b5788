//! Variance-reduction and Monte Carlo estimation utilities.
//!
//! - [`mc_price`]: discounted sample mean with standard error and 95% CI
//! - [`control_variate_adjustment`]: control-variate corrected mean and β
//! - [`mean_and_std_error`]: plain mean and standard error (re-exported)

pub mod control_variate;
pub mod estimator;

pub use control_variate::{control_variate_adjustment, ControlVariateEstimate};
pub use estimator::{mc_price, McEstimate};
pub use mcop_core::math::mean_and_std_error;

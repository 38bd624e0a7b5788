//! European command implementation
//!
//! Monte Carlo European price with standard error and 95% confidence
//! interval, a control-variate estimate using the discounted terminal spot
//! (known mean `S0·e^(-qT)`), and the Black-Scholes value for comparison.

use mcop_core::types::OptionType;
use mcop_pricing::analytical::black_scholes_price;
use mcop_pricing::mc::{european_payoffs, simulate_gbm_paths};
use mcop_pricing::variance_reduction::{control_variate_adjustment, mc_price, McEstimate};
use serde::Serialize;
use tracing::info;

use super::{fmt_price, fmt_seed, Report};
use crate::config::CliConfig;
use crate::Result;

/// European Monte Carlo report
#[derive(Debug, Clone, Serialize)]
pub struct EuropeanReport {
    pub option_type: OptionType,
    pub estimate: McEstimate,
    pub control_variate_price: f64,
    pub control_variate_beta: f64,
    pub black_scholes: f64,
    pub n_steps: usize,
    pub n_paths: usize,
    pub seed: Option<u64>,
}

impl Report for EuropeanReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Option", format!("European {}", self.option_type)),
            ("MC price", fmt_price(self.estimate.price)),
            ("Std error", fmt_price(self.estimate.std_error)),
            (
                "95% CI",
                format!(
                    "[{}, {}]",
                    fmt_price(self.estimate.ci_low),
                    fmt_price(self.estimate.ci_high)
                ),
            ),
            ("CV price", fmt_price(self.control_variate_price)),
            ("CV beta", format!("{:.4}", self.control_variate_beta)),
            ("Black-Scholes", fmt_price(self.black_scholes)),
            ("Steps", self.n_steps.to_string()),
            ("Paths", self.n_paths.to_string()),
            ("Seed", fmt_seed(self.seed)),
        ]
    }
}

/// Run the european command
pub fn run(config: &CliConfig) -> Result<EuropeanReport> {
    let params = config.model_parameters()?;
    let sim = config.simulation_config()?;
    let option_type = config.option_type();

    info!(
        %option_type,
        n_paths = sim.n_paths(),
        n_steps = sim.n_steps(),
        "Starting European Monte Carlo"
    );

    let paths = simulate_gbm_paths(&params, &sim)?;
    let payoffs = european_payoffs(&paths, config.strike, option_type);
    let estimate = mc_price(&payoffs, params.rate(), params.maturity())?;

    let df = params.maturity_discount();
    let discounted_payoffs: Vec<f64> = payoffs.iter().map(|p| df * p).collect();
    let discounted_spots: Vec<f64> = paths.terminal_prices().iter().map(|s| df * s).collect();
    let spot_mean = params.spot() * (-params.dividend_yield() * params.maturity()).exp();
    let cv = control_variate_adjustment(&discounted_payoffs, &discounted_spots, spot_mean)?;

    let black_scholes = black_scholes_price(&params, config.strike, option_type)?;

    info!(
        price = estimate.price,
        std_error = estimate.std_error,
        black_scholes,
        "European pricing complete"
    );

    Ok(EuropeanReport {
        option_type,
        estimate,
        control_variate_price: cv.mean,
        control_variate_beta: cv.beta,
        black_scholes,
        n_steps: sim.n_steps(),
        n_paths: sim.n_paths(),
        seed: sim.seed(),
    })
}

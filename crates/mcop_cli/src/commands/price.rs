//! Price command implementation
//!
//! Simulates antithetic GBM paths and prices an American option with the
//! selected Longstaff-Schwartz engine.

use mcop_core::types::OptionType;
use mcop_pricing::lsm::{EngineKind, StepDiagnostics};
use mcop_pricing::mc::simulate_gbm_paths;
use serde::Serialize;
use tracing::info;

use super::{fmt_price, fmt_seed, Report};
use crate::config::CliConfig;
use crate::Result;

/// American LSM price report
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub option_type: OptionType,
    pub engine: EngineKind,
    pub price: f64,
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub dividend_yield: f64,
    pub volatility: f64,
    pub maturity: f64,
    pub n_steps: usize,
    pub n_paths: usize,
    pub degree: usize,
    pub seed: Option<u64>,
    pub early_exercises: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Vec<StepDiagnostics>>,
}

impl Report for PriceReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Option", format!("American {}", self.option_type)),
            ("Engine", self.engine.to_string()),
            ("Price", fmt_price(self.price)),
            ("S0", self.spot.to_string()),
            ("K", self.strike.to_string()),
            ("r", self.rate.to_string()),
            ("q", self.dividend_yield.to_string()),
            ("sigma", self.volatility.to_string()),
            ("T", self.maturity.to_string()),
            ("Steps", self.n_steps.to_string()),
            ("Paths", self.n_paths.to_string()),
            ("Degree", self.degree.to_string()),
            ("Seed", fmt_seed(self.seed)),
            ("Early exercises", self.early_exercises.to_string()),
        ]
    }
}

/// Run the price command
pub fn run(config: &CliConfig, with_diagnostics: bool) -> Result<PriceReport> {
    let params = config.model_parameters()?;
    let sim = config.simulation_config()?;
    let lsm = config.lsm_config()?;
    let engine = config.engine.pricer()?;

    info!(
        engine = engine.name(),
        option_type = %lsm.option_type(),
        n_paths = sim.n_paths(),
        n_steps = sim.n_steps(),
        degree = lsm.degree(),
        "Starting LSM pricing"
    );

    let paths = simulate_gbm_paths(&params, &sim)?;
    let output = engine.price_detailed(&paths, &lsm)?;

    info!(price = output.price, "Pricing complete");

    Ok(PriceReport {
        option_type: lsm.option_type(),
        engine: config.engine,
        price: output.price,
        spot: params.spot(),
        strike: lsm.strike(),
        rate: params.rate(),
        dividend_yield: params.dividend_yield(),
        volatility: params.volatility(),
        maturity: params.maturity(),
        n_steps: sim.n_steps(),
        n_paths: sim.n_paths(),
        degree: lsm.degree(),
        seed: sim.seed(),
        early_exercises: output.early_exercise_count(),
        diagnostics: with_diagnostics.then_some(output.diagnostics),
    })
}

//! Lattice command implementation
//!
//! Prices on a CRR binomial lattice; used as the reference value for the
//! `price` command.

use mcop_core::types::{ExerciseStyle, OptionType};
use mcop_pricing::lattice::price_binomial;
use serde::Serialize;
use tracing::info;

use super::{fmt_price, Report};
use crate::config::CliConfig;
use crate::Result;

/// Binomial lattice report
#[derive(Debug, Clone, Serialize)]
pub struct LatticeReport {
    pub option_type: OptionType,
    pub style: ExerciseStyle,
    pub price: f64,
    pub n_steps: usize,
}

impl Report for LatticeReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Option", format!("{} {}", self.style, self.option_type)),
            ("Price", fmt_price(self.price)),
            ("Steps", self.n_steps.to_string()),
        ]
    }
}

/// Run the lattice command
pub fn run(config: &CliConfig, style: ExerciseStyle) -> Result<LatticeReport> {
    let params = config.model_parameters()?;
    let option_type = config.option_type();

    info!(%option_type, %style, n_steps = config.n_steps, "Starting lattice pricing");
    let price = price_binomial(&params, config.strike, config.n_steps, option_type, style)?;

    Ok(LatticeReport {
        option_type,
        style,
        price,
        n_steps: config.n_steps,
    })
}

//! mcop - American option pricing from the command line
//!
//! # Commands
//!
//! - `mcop price` - American option by Longstaff-Schwartz regression
//! - `mcop european` - European Monte Carlo estimate next to Black-Scholes
//! - `mcop lattice` - CRR binomial reference price
//!
//! # Architecture
//!
//! As the service layer, this crate only resolves configuration and renders
//! reports; all numerics live in `mcop_pricing`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mcop_core::types::ExerciseStyle;
use mcop_pricing::lsm::EngineKind;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{load_config, ContractArgs, LogLevel, OutputFormat, SimulationArgs};

/// American option pricing by Longstaff-Schwartz Monte Carlo
#[derive(Parser, Debug)]
#[command(name = "mcop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format) [default: mcop.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price an American option with Longstaff-Schwartz regression
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Polynomial basis degree [default: 2]
        #[arg(long, allow_negative_numbers = true)]
        degree: Option<i64>,

        /// Pricing engine (reference, accelerated) [default: reference]
        #[arg(long)]
        engine: Option<EngineKind>,

        /// Include per-step regression diagnostics in JSON output
        #[arg(long)]
        diagnostics: bool,
    },

    /// Estimate a European option by Monte Carlo
    European {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Price on a CRR binomial lattice
    Lattice {
        #[command(flatten)]
        contract: ContractArgs,

        /// European exercise instead of American
        #[arg(long)]
        european: bool,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = load_config(cli.config.as_ref(), |key| std::env::var(key).ok())?;
    config.merge_global(cli.log_level, cli.format);

    init_tracing(config.log_level.as_filter_str());
    debug!(config_file = ?cli.config, "Configuration loaded");

    match cli.command {
        Commands::Price {
            contract,
            simulation,
            degree,
            engine,
            diagnostics,
        } => {
            config.merge_contract(&contract);
            config.merge_simulation(&simulation);
            config.merge_lsm(degree, engine);
            let report = commands::price::run(&config, diagnostics)?;
            commands::render(&report, config.format)
        }
        Commands::European {
            contract,
            simulation,
        } => {
            config.merge_contract(&contract);
            config.merge_simulation(&simulation);
            let report = commands::european::run(&config)?;
            commands::render(&report, config.format)
        }
        Commands::Lattice { contract, european } => {
            config.merge_contract(&contract);
            let style = if european {
                ExerciseStyle::European
            } else {
                ExerciseStyle::American
            };
            let report = commands::lattice::run(&config, style)?;
            commands::render(&report, config.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_price_aliases_and_negative_degree() {
        let cli = Cli::try_parse_from([
            "mcop", "price", "--S0", "36", "--K", "40", "--degree", "-1", "--engine", "parallel",
        ])
        .unwrap();

        match cli.command {
            Commands::Price {
                contract,
                degree,
                engine,
                ..
            } => {
                assert_eq!(contract.spot, Some(36.0));
                assert_eq!(contract.strike, Some(40.0));
                assert_eq!(degree, Some(-1));
                assert_eq!(engine, Some(EngineKind::Accelerated));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["mcop", "lattice", "--european", "--format", "json"])
            .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Lattice { european: true, .. }));
    }

    #[test]
    fn test_seed_conflicts_with_entropy() {
        let result = Cli::try_parse_from(["mcop", "european", "--seed", "1", "--entropy"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let result = Cli::try_parse_from(["mcop", "price", "--engine", "gpu"]);
        assert!(result.is_err());
    }
}

//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, `MCOP_*` environment
//! variables and command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Config file (`--config`, or `mcop.toml` if present)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use mcop_core::types::{ModelParameters, OptionType, PricingError, PricingResult};
use mcop_pricing::lsm::{EngineKind, LsmConfig};
use mcop_pricing::mc::SimulationConfig;
use serde::Deserialize;
use thiserror::Error;

/// Config file loaded when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "mcop.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}: {reason}")]
    EnvError { name: String, reason: String },
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Result rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Resolved pricing configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Initial spot price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Continuous dividend yield
    pub dividend_yield: f64,
    /// Volatility
    pub volatility: f64,
    /// Maturity in years
    pub maturity: f64,
    /// Time steps (simulation grid or lattice depth)
    pub n_steps: usize,
    /// Simulated paths
    pub n_paths: usize,
    /// Regression degree; signed so that negative input is reported, not rejected by the parser
    pub degree: i64,
    /// Simulation seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Price a call instead of a put
    pub call: bool,
    /// Antithetic variates
    pub antithetic: bool,
    /// LSM engine
    #[serde(deserialize_with = "deserialize_engine")]
    pub engine: EngineKind,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_engine<'de, D>(deserializer: D) -> Result<EngineKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EngineKind::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            dividend_yield: 0.0,
            volatility: 0.2,
            maturity: 1.0,
            n_steps: 100,
            n_paths: 50_000,
            degree: LsmConfig::DEFAULT_DEGREE as i64,
            seed: Some(123),
            call: false,
            antithetic: true,
            engine: EngineKind::Reference,
            log_level: LogLevel::default(),
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Override with `MCOP_*` variables resolved through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvReader { lookup };

        env.set("MCOP_SPOT", &mut self.spot)?;
        env.set("MCOP_STRIKE", &mut self.strike)?;
        env.set("MCOP_RATE", &mut self.rate)?;
        env.set("MCOP_DIVIDEND_YIELD", &mut self.dividend_yield)?;
        env.set("MCOP_VOLATILITY", &mut self.volatility)?;
        env.set("MCOP_MATURITY", &mut self.maturity)?;
        env.set("MCOP_N_STEPS", &mut self.n_steps)?;
        env.set("MCOP_N_PATHS", &mut self.n_paths)?;
        env.set("MCOP_DEGREE", &mut self.degree)?;
        env.set("MCOP_ENGINE", &mut self.engine)?;
        env.set("MCOP_LOG_LEVEL", &mut self.log_level)?;
        env.set("MCOP_FORMAT", &mut self.format)?;

        if let Some(seed) = env.parse::<u64>("MCOP_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(call) = env.flag("MCOP_CALL")? {
            self.call = call;
        }
        if let Some(antithetic) = env.flag("MCOP_ANTITHETIC")? {
            self.antithetic = antithetic;
        }

        Ok(())
    }

    /// Merge global CLI options (CLI takes precedence)
    pub fn merge_global(&mut self, log_level: Option<LogLevel>, format: Option<OutputFormat>) {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
    }

    /// Merge contract arguments (CLI takes precedence)
    pub fn merge_contract(&mut self, args: &ContractArgs) {
        merge(&mut self.spot, args.spot);
        merge(&mut self.strike, args.strike);
        merge(&mut self.rate, args.rate);
        merge(&mut self.dividend_yield, args.dividend_yield);
        merge(&mut self.volatility, args.volatility);
        merge(&mut self.maturity, args.maturity);
        merge(&mut self.n_steps, args.n_steps);
        if args.call {
            self.call = true;
        }
    }

    /// Merge simulation arguments (CLI takes precedence)
    pub fn merge_simulation(&mut self, args: &SimulationArgs) {
        merge(&mut self.n_paths, args.n_paths);
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if args.entropy {
            self.seed = None;
        }
        if args.no_antithetic {
            self.antithetic = false;
        }
    }

    /// Merge LSM arguments (CLI takes precedence)
    pub fn merge_lsm(&mut self, degree: Option<i64>, engine: Option<EngineKind>) {
        merge(&mut self.degree, degree);
        merge(&mut self.engine, engine);
    }

    /// Call or put
    pub fn option_type(&self) -> OptionType {
        OptionType::from_is_call(self.call)
    }

    /// Validated model parameters
    pub fn model_parameters(&self) -> PricingResult<ModelParameters> {
        ModelParameters::new(
            self.spot,
            self.rate,
            self.dividend_yield,
            self.volatility,
            self.maturity,
        )
    }

    /// Validated simulation configuration
    pub fn simulation_config(&self) -> PricingResult<SimulationConfig> {
        SimulationConfig::builder()
            .n_paths(self.n_paths)
            .n_steps(self.n_steps)
            .maybe_seed(self.seed)
            .antithetic(self.antithetic)
            .build()
    }

    /// Validated LSM configuration
    pub fn lsm_config(&self) -> PricingResult<LsmConfig> {
        let degree = usize::try_from(self.degree).map_err(|_| {
            PricingError::invalid(
                "degree",
                format!("must be non-negative, got {}", self.degree),
            )
        })?;
        let design_bytes = degree
            .checked_add(1)
            .and_then(|cols| cols.checked_mul(self.n_paths))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()));
        if !design_bytes.is_some_and(|bytes| bytes <= isize::MAX as usize) {
            return Err(PricingError::invalid(
                "degree",
                format!(
                    "{} basis columns for {} paths cannot be allocated",
                    self.degree.saturating_add(1),
                    self.n_paths
                ),
            ));
        }

        LsmConfig::builder()
            .strike(self.strike)
            .rate(self.rate)
            .maturity(self.maturity)
            .option_type(self.option_type())
            .degree(degree)
            .dividend_yield(self.dividend_yield)
            .build()
    }
}

fn merge<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn parse<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.lookup)(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| ConfigError::EnvError {
                    name: name.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    fn set<T>(&self, name: &str, target: &mut T) -> Result<(), ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        if let Some(value) = self.parse(name)? {
            *target = value;
        }
        Ok(())
    }

    fn flag(&self, name: &str) -> Result<Option<bool>, ConfigError> {
        match (self.lookup)(name) {
            None => Ok(None),
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" => Ok(Some(false)),
                other => Err(ConfigError::EnvError {
                    name: name.to_string(),
                    reason: format!("expected a boolean, got '{}'", other),
                }),
            },
        }
    }
}

/// Contract and model arguments shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ContractArgs {
    /// Initial spot price [default: 100]
    #[arg(long, visible_alias = "S0")]
    pub spot: Option<f64>,

    /// Strike price [default: 100]
    #[arg(long, visible_alias = "K")]
    pub strike: Option<f64>,

    /// Risk-free rate [default: 0.05]
    #[arg(long, visible_alias = "r", allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Continuous dividend yield [default: 0]
    #[arg(long, visible_alias = "q", allow_negative_numbers = true)]
    pub dividend_yield: Option<f64>,

    /// Volatility [default: 0.2]
    #[arg(long, visible_alias = "sigma", allow_negative_numbers = true)]
    pub volatility: Option<f64>,

    /// Maturity in years [default: 1]
    #[arg(long, visible_alias = "T")]
    pub maturity: Option<f64>,

    /// Number of time steps [default: 100]
    #[arg(long)]
    pub n_steps: Option<usize>,

    /// Price a call (default: put)
    #[arg(long)]
    pub call: bool,
}

/// Monte Carlo simulation arguments
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Number of simulated paths [default: 50000]
    #[arg(long)]
    pub n_paths: Option<usize>,

    /// Random seed [default: 123]
    #[arg(long, conflicts_with = "entropy")]
    pub seed: Option<u64>,

    /// Seed from OS entropy (non-reproducible)
    #[arg(long)]
    pub entropy: bool,

    /// Disable antithetic variates
    #[arg(long)]
    pub no_antithetic: bool,
}

/// Build configuration from file and environment
///
/// `config_file` must exist when given; otherwise [`DEFAULT_CONFIG_FILE`]
/// is read if present. CLI arguments are merged afterwards by the caller.
pub fn load_config<F>(config_file: Option<&PathBuf>, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let mut config = match config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if default_path.exists() => CliConfig::from_file(default_path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.spot, 100.0);
        assert_eq!(config.strike, 100.0);
        assert_eq!(config.rate, 0.05);
        assert_eq!(config.dividend_yield, 0.0);
        assert_eq!(config.volatility, 0.2);
        assert_eq!(config.maturity, 1.0);
        assert_eq!(config.n_steps, 100);
        assert_eq!(config.n_paths, 50_000);
        assert_eq!(config.degree, 2);
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.option_type(), OptionType::Put);
        assert_eq!(config.engine, EngineKind::Reference);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = CliConfig::from_toml_str(
            r#"
            strike = 110.0
            call = true
            engine = "Accelerated"
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.strike, 110.0);
        assert!(config.call);
        assert_eq!(config.engine, EngineKind::Accelerated);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.spot, 100.0);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = CliConfig::from_toml_str("strik = 1.0").unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = CliConfig::from_toml_str("spot = 90.0\nn_paths = 1000").unwrap();
        config
            .apply_env(env(&[
                ("MCOP_SPOT", "95"),
                ("MCOP_SEED", "7"),
                ("MCOP_CALL", "true"),
                ("MCOP_DEGREE", "-1"),
            ]))
            .unwrap();

        assert_eq!(config.spot, 95.0);
        assert_eq!(config.n_paths, 1000);
        assert_eq!(config.seed, Some(7));
        assert!(config.call);
        assert_eq!(config.degree, -1);
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let mut config = CliConfig::default();
        let err = config
            .apply_env(env(&[("MCOP_N_PATHS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("MCOP_N_PATHS"));

        let err = config.apply_env(env(&[("MCOP_CALL", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("MCOP_CALL"));
    }

    #[test]
    fn test_cli_overrides_env() {
        let mut config = CliConfig::default();
        config.apply_env(env(&[("MCOP_STRIKE", "120")])).unwrap();

        config.merge_contract(&ContractArgs {
            strike: Some(105.0),
            call: true,
            ..Default::default()
        });
        config.merge_simulation(&SimulationArgs {
            entropy: true,
            ..Default::default()
        });
        config.merge_lsm(Some(3), None);

        assert_eq!(config.strike, 105.0);
        assert!(config.call);
        assert_eq!(config.seed, None);
        assert_eq!(config.degree, 3);
    }

    #[test]
    fn test_negative_degree_is_input_validation() {
        let config = CliConfig {
            degree: -1,
            ..Default::default()
        };
        let err = config.lsm_config().unwrap_err();
        assert_eq!(err.parameter(), Some("degree"));
    }

    #[test]
    fn test_unallocatable_degree_is_input_validation() {
        let config = CliConfig {
            degree: i64::MAX,
            ..Default::default()
        };
        let err = config.lsm_config().unwrap_err();
        assert_eq!(err.parameter(), Some("degree"));

        let config = CliConfig {
            degree: 1 << 40,
            n_paths: 1 << 30,
            ..Default::default()
        };
        assert_eq!(config.lsm_config().unwrap_err().parameter(), Some("degree"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let missing = PathBuf::from("/nonexistent/mcop.toml");
        let err = load_config(Some(&missing), env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::FileError(_)));
    }
}

//! CLI configuration management.
//!
//! Handles loading of `vanilla.toml` with environment variable override
//! support. Every section is optional; command-line flags take precedence
//! over both the file and the environment.

use std::path::Path;

use pricer_core::types::OptionType;
use pricer_pricing::mc::{DEFAULT_CHUNK_SIZE, DEFAULT_SEED, MAX_TRIALS};
use serde::{Deserialize, Serialize};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "vanilla.toml";

/// Trials used when neither the config nor the command line sets them.
pub const DEFAULT_TRIALS: usize = 1_000_000;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Default contract terms. Any field left out must be given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSection {
    /// Spot price S0
    pub spot: Option<f64>,
    /// Strike K
    pub strike: Option<f64>,
    /// Maturity T in years
    pub maturity: Option<f64>,
    /// Continuously compounded risk-free rate r
    #[serde(alias = "risk_free_rate", alias = "riskFreeRate")]
    pub rate: Option<f64>,
    /// Volatility σ
    pub volatility: Option<f64>,
    /// Call or put
    pub option_type: Option<OptionType>,
}

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonteCarloSection {
    /// Number of simulated terminal prices
    pub trials: usize,
    /// Seed for reproducibility
    pub seed: u64,
    /// Trials per partition on the parallel path
    pub chunk_size: usize,
    /// Spread partitions across threads
    pub parallel: bool,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel: false,
        }
    }
}

/// `vanilla` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VanillaConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Default contract terms
    pub contract: ContractSection,

    /// Monte Carlo settings
    pub monte_carlo: MonteCarloSection,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VanillaConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            contract: ContractSection::default(),
            monte_carlo: MonteCarloSection::default(),
        }
    }
}

impl VanillaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the file if it exists, otherwise return the default config.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_if_present(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Values that do not parse leave the setting unchanged.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(trials) = lookup("VANILLA_TRIALS").and_then(|v| v.trim().parse().ok()) {
            self.monte_carlo.trials = trials;
        }

        if let Some(seed) = lookup("VANILLA_SEED").and_then(|v| v.trim().parse().ok()) {
            self.monte_carlo.seed = seed;
        }

        if let Some(parallel) = lookup("VANILLA_PARALLEL") {
            self.monte_carlo.parallel = match parallel.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => self.monte_carlo.parallel,
            };
        }

        if let Some(log_level) = lookup("VANILLA_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let mc = &self.monte_carlo;
        if mc.trials == 0 {
            errors.push("monte_carlo.trials must be greater than 0".to_string());
        }
        if mc.trials > MAX_TRIALS {
            errors.push(format!(
                "monte_carlo.trials {} exceeds maximum allowed ({})",
                mc.trials, MAX_TRIALS
            ));
        }
        if mc.chunk_size == 0 {
            errors.push("monte_carlo.chunk_size must be greater than 0".to_string());
        }

        let contract = &self.contract;
        let positive = [
            ("spot", contract.spot),
            ("strike", contract.strike),
            ("maturity", contract.maturity),
            ("volatility", contract.volatility),
        ];
        for (name, value) in positive {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    errors.push(format!(
                        "contract.{} must be positive and finite, got {}",
                        name, v
                    ));
                }
            }
        }
        if let Some(rate) = contract.rate {
            if !rate.is_finite() {
                errors.push(format!("contract.rate must be finite, got {}", rate));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

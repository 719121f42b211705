//! Vanilla CLI - Command Line Pricing of European Options
//!
//! This is the operational entry point for the vanilla option pricer.
//!
//! # Commands
//!
//! - `vanilla price` - Price a call or put (closed form, Monte Carlo, or both)
//! - `vanilla parity` - Check put-call parity for a set of terms
//! - `vanilla check` - Validate and print the effective configuration
//!
//! # Configuration
//!
//! Settings are layered: `vanilla.toml` (optional), then `VANILLA_*`
//! environment variables, then command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::price::{MonteCarloArgs, Method};
use commands::{ContractArgs, OutputFormat};
use config::{VanillaConfig, DEFAULT_CONFIG_PATH};

/// European option pricer
#[derive(Parser)]
#[command(name = "vanilla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Pricing method
        #[arg(short, long, value_enum, default_value_t = Method::Both)]
        method: Method,

        #[command(flatten)]
        monte_carlo: MonteCarloArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check put-call parity for a set of terms
    Parity {
        #[command(flatten)]
        contract: ContractArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let level = if verbose {
        "debug".to_string()
    } else {
        log_level.to_lowercase()
    };

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = VanillaConfig::load_if_present(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?
        .with_env_override();

    init_tracing(cli.verbose, &config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "effective configuration");

    match cli.command {
        Commands::Price {
            contract,
            method,
            monte_carlo,
            format,
        } => {
            config.validate()?;
            let contract = contract.resolve(&config.contract)?;
            let mc_config = monte_carlo.resolve(&config.monte_carlo)?;
            commands::price::run(contract, method, mc_config, format)?;
        }
        Commands::Parity { contract, format } => {
            config.validate()?;
            let contract = contract.resolve(&config.contract)?;
            commands::parity::run(&contract, format)?;
        }
        Commands::Check => commands::check::run(&cli.config, &config)?,
    }

    Ok(())
}

//! Price command implementation
//!
//! Prices a single European option with the closed form, Monte Carlo, or
//! both side by side.

use clap::{Args, ValueEnum};
use pricer_core::types::{OptionContract, PricingError};
use pricer_models::analytical::price_analytic;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer, PricingResult};
use serde::Serialize;
use tracing::info;

use super::{render_table, OutputFormat};
use crate::config::MonteCarloSection;
use crate::Result;

/// Pricing method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Black-Scholes-Merton closed form
    Analytic,
    /// Monte Carlo simulation of the terminal price
    MonteCarlo,
    /// Both, with the difference between them
    #[default]
    Both,
}

/// Monte Carlo flags; unset values come from `[monte_carlo]` in the config.
#[derive(Debug, Clone, Default, Args)]
pub struct MonteCarloArgs {
    /// Number of simulated terminal prices
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Trials per partition on the parallel path
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Spread the simulation across all cores
    #[arg(short, long, overrides_with = "no_parallel")]
    pub parallel: bool,

    /// Simulate on a single thread even if the config enables parallel runs
    #[arg(long, overrides_with = "parallel")]
    pub no_parallel: bool,
}

impl MonteCarloArgs {
    /// Parallel setting from the command line, if either flag was given.
    pub fn parallel_flag(&self) -> Option<bool> {
        match (self.parallel, self.no_parallel) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// Merges flags over the config section and builds a validated config.
    pub fn resolve(&self, defaults: &MonteCarloSection) -> Result<MonteCarloConfig> {
        let config = MonteCarloConfig::builder()
            .n_trials(self.trials.unwrap_or(defaults.trials))
            .seed(self.seed.unwrap_or(defaults.seed))
            .chunk_size(self.chunk_size.unwrap_or(defaults.chunk_size))
            .parallel(self.parallel_flag().unwrap_or(defaults.parallel))
            .build()
            .map_err(PricingError::from)?;
        Ok(config)
    }
}

/// Result of a `price` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Contract that was priced
    pub contract: OptionContract<f64>,
    /// Closed-form value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytic: Option<f64>,
    /// Monte Carlo estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<PricingResult>,
    /// Seed used for the Monte Carlo run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl PriceReport {
    /// Monte Carlo minus closed form, when both were computed.
    pub fn difference(&self) -> Option<f64> {
        match (self.analytic, self.monte_carlo) {
            (Some(analytic), Some(mc)) => Some(mc.price - analytic),
            _ => None,
        }
    }

    /// Renders the report as a table.
    pub fn to_table(&self) -> String {
        let mut rows = Vec::new();

        if let Some(price) = self.analytic {
            rows.push(vec![
                "Analytic".to_string(),
                format!("{:.6}", price),
                "-".to_string(),
                "-".to_string(),
            ]);
        }

        if let Some(mc) = self.monte_carlo {
            rows.push(vec![
                format!("Monte Carlo ({} trials)", mc.n_trials),
                format!("{:.6}", mc.price),
                format!("{:.6}", mc.std_error),
                format!(
                    "[{:.4}, {:.4}]",
                    mc.price - mc.confidence_95(),
                    mc.price + mc.confidence_95()
                ),
            ]);
        }

        let c = &self.contract;
        let mut out = format!(
            "{} S={} K={} T={} r={} σ={}\n",
            c.option_type(),
            c.spot(),
            c.strike(),
            c.maturity(),
            c.rate(),
            c.volatility()
        );
        out.push_str(&render_table(&["Method", "Price", "Std Error", "95% CI"], &rows));
        if let Some(diff) = self.difference() {
            out.push_str(&format!("MC - analytic: {:+.6}\n", diff));
        }
        out
    }
}

/// Prices the contract with the selected method(s).
pub fn evaluate(
    contract: OptionContract<f64>,
    method: Method,
    mc_config: MonteCarloConfig,
) -> Result<PriceReport> {
    let analytic = match method {
        Method::Analytic | Method::Both => Some(price_analytic(&contract)?),
        Method::MonteCarlo => None,
    };

    let (monte_carlo, seed) = match method {
        Method::MonteCarlo | Method::Both => {
            let seed = mc_config.seed();
            let pricer = MonteCarloPricer::new(mc_config).map_err(PricingError::from)?;
            (Some(pricer.price(&contract)?), Some(seed))
        }
        Method::Analytic => (None, None),
    };

    Ok(PriceReport {
        contract,
        analytic,
        monte_carlo,
        seed,
    })
}

/// Run the price command
pub fn run(
    contract: OptionContract<f64>,
    method: Method,
    mc_config: MonteCarloConfig,
    format: OutputFormat,
) -> Result<()> {
    info!("Starting pricing...");
    info!("  Method: {:?}", method);
    if method != Method::Analytic {
        info!(
            "  Monte Carlo: {} trials, seed {}, parallel {}",
            mc_config.n_trials(),
            mc_config.seed(),
            mc_config.parallel()
        );
    }

    let report = evaluate(contract, method, mc_config)?;

    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn reference_call() -> OptionContract<f64> {
        OptionContract::call(100.0, 105.0, 1.0, 0.05, 0.2).unwrap()
    }

    fn mc_config(n_trials: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder()
            .n_trials(n_trials)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_analytic_only() {
        let report = evaluate(reference_call(), Method::Analytic, mc_config(10)).unwrap();
        assert!((report.analytic.unwrap() - 8.0214).abs() < 1e-3);
        assert!(report.monte_carlo.is_none());
        assert!(report.difference().is_none());
    }

    #[test]
    fn test_both_methods_agree() {
        let report = evaluate(reference_call(), Method::Both, mc_config(200_000)).unwrap();
        let mc = report.monte_carlo.unwrap();

        assert_eq!(mc.n_trials, 200_000);
        assert_eq!(report.seed, Some(42));
        assert!(report.difference().unwrap().abs() < 5.0 * mc.std_error);
    }

    #[test]
    fn test_monte_carlo_args_merge() {
        let defaults = MonteCarloSection::default();
        let args = MonteCarloArgs {
            trials: Some(500),
            parallel: true,
            ..MonteCarloArgs::default()
        };

        let config = args.resolve(&defaults).unwrap();
        assert_eq!(config.n_trials(), 500);
        assert_eq!(config.seed(), defaults.seed);
        assert!(config.parallel());
    }

    #[test]
    fn test_no_parallel_overrides_config() {
        let defaults = MonteCarloSection {
            parallel: true,
            ..MonteCarloSection::default()
        };

        let args = MonteCarloArgs {
            no_parallel: true,
            ..MonteCarloArgs::default()
        };
        assert!(!args.resolve(&defaults).unwrap().parallel());

        let unset = MonteCarloArgs::default();
        assert_eq!(unset.parallel_flag(), None);
        assert!(unset.resolve(&defaults).unwrap().parallel());
    }

    #[test]
    fn test_zero_trials_rejected() {
        let args = MonteCarloArgs {
            trials: Some(0),
            ..MonteCarloArgs::default()
        };
        assert!(matches!(
            args.resolve(&MonteCarloSection::default()),
            Err(CliError::Pricing(PricingError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_table_and_json_output() {
        let report = evaluate(reference_call(), Method::Both, mc_config(1_000)).unwrap();

        let table = report.to_table();
        assert!(table.starts_with("Call S=100 K=105"));
        assert!(table.contains("Analytic"));
        assert!(table.contains("Monte Carlo (1000 trials)"));
        assert!(table.contains("MC - analytic"));

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["contract"]["option_type"], "call");
        assert_eq!(json["monte_carlo"]["n_trials"], 1_000);
        assert!(json["analytic"].as_f64().is_some());
    }
}

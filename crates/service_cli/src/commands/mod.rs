//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Contract flags and the
//! output format are shared between `price` and `parity`.

pub mod check;
pub mod parity;
pub mod price;

use clap::{Args, ValueEnum};
use pricer_core::types::{OptionContract, OptionType, PricingError};

use crate::config::ContractSection;
use crate::{CliError, Result};

/// Contract terms given on the command line.
///
/// Anything left out falls back to the `[contract]` section of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ContractArgs {
    /// Spot price S0
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike K
    #[arg(long)]
    pub strike: Option<f64>,

    /// Maturity T in years
    #[arg(long)]
    pub maturity: Option<f64>,

    /// Continuously compounded risk-free rate (e.g. 0.05)
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Volatility (e.g. 0.2)
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Option type (call or put)
    #[arg(short = 't', long)]
    pub option_type: Option<String>,
}

impl ContractArgs {
    /// Merges flags over the config defaults and builds a validated contract.
    pub fn resolve(&self, defaults: &ContractSection) -> Result<OptionContract<f64>> {
        let spot = required("spot", self.spot, defaults.spot)?;
        let strike = required("strike", self.strike, defaults.strike)?;
        let maturity = required("maturity", self.maturity, defaults.maturity)?;
        let rate = required("rate", self.rate, defaults.rate)?;
        let volatility = required("volatility", self.volatility, defaults.volatility)?;

        let option_type = match &self.option_type {
            Some(text) => text.parse::<OptionType>().map_err(PricingError::from)?,
            None => defaults.option_type.unwrap_or(OptionType::Call),
        };

        let contract = OptionContract::new(spot, strike, maturity, rate, volatility, option_type)
            .map_err(PricingError::from)?;
        Ok(contract)
    }
}

fn required(name: &'static str, flag: Option<f64>, default: Option<f64>) -> Result<f64> {
    flag.or(default).ok_or(CliError::MissingArgument(name))
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Renders rows as a box-drawn table with left-aligned columns.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(mid), right)
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&line(headers.to_vec()));
    out.push_str(&rule("├", "┼", "┤"));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}

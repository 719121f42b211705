//! Parity command implementation
//!
//! Prices the call and the put on the same terms and reports the put-call
//! parity residual `C - P - (S0 - K·e^(-rT))`.

use pricer_core::types::{OptionContract, OptionType};
use pricer_models::analytical::price_analytic;
use serde::Serialize;
use tracing::info;

use super::{render_table, OutputFormat};
use crate::Result;

/// Call, put and parity residual for one set of terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParityReport {
    /// Closed-form call value
    pub call: f64,
    /// Closed-form put value
    pub put: f64,
    /// Discounted forward `S0 - K·e^(-rT)`
    pub forward: f64,
    /// `call - put - forward`
    pub residual: f64,
}

impl ParityReport {
    /// Renders the report as a table.
    pub fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = [
            ("Call", self.call),
            ("Put", self.put),
            ("S0 - K·e^(-rT)", self.forward),
            ("Residual", self.residual),
        ]
        .iter()
        .map(|(label, value)| vec![label.to_string(), format!("{:.10}", value)])
        .collect();

        render_table(&["Quantity", "Value"], &rows)
    }
}

/// Computes both legs of the parity relation.
pub fn evaluate(contract: &OptionContract<f64>) -> Result<ParityReport> {
    let call = price_analytic(&contract.with_option_type(OptionType::Call))?;
    let put = price_analytic(&contract.with_option_type(OptionType::Put))?;
    let forward = contract.spot() - contract.strike() * contract.discount_factor();

    Ok(ParityReport {
        call,
        put,
        forward,
        residual: call - put - forward,
    })
}

/// Run the parity command
pub fn run(contract: &OptionContract<f64>, format: OutputFormat) -> Result<()> {
    info!("Checking put-call parity...");

    let report = evaluate(contract)?;

    match format {
        OutputFormat::Table => print!("{}", report.to_table()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_parity() {
        let contract = OptionContract::put(100.0, 105.0, 1.0, 0.05, 0.2).unwrap();
        let report = evaluate(&contract).unwrap();

        assert_abs_diff_eq!(report.call, 8.0214, epsilon = 1e-3);
        assert_abs_diff_eq!(report.put, 7.9004, epsilon = 1e-3);
        assert_abs_diff_eq!(report.residual, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_table_lists_all_quantities() {
        let contract = OptionContract::call(80.0, 100.0, 0.5, -0.01, 0.35).unwrap();
        let table = evaluate(&contract).unwrap().to_table();

        for label in ["Call", "Put", "Residual"] {
            assert!(table.contains(label));
        }
    }
}

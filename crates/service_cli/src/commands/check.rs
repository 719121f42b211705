//! Check command implementation
//!
//! Validates the effective configuration (file plus environment overrides)
//! and prints it.

use std::path::Path;

use tracing::info;

use super::render_table;
use crate::config::VanillaConfig;
use crate::Result;

fn show(value: Option<f64>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| v.to_string())
}

/// Lists the effective settings as table rows.
pub fn settings(config: &VanillaConfig) -> Vec<Vec<String>> {
    let c = &config.contract;
    let mc = &config.monte_carlo;

    [
        ("log_level", config.log_level.clone()),
        ("contract.spot", show(c.spot)),
        ("contract.strike", show(c.strike)),
        ("contract.maturity", show(c.maturity)),
        ("contract.rate", show(c.rate)),
        ("contract.volatility", show(c.volatility)),
        (
            "contract.option_type",
            c.option_type.map_or_else(|| "(unset)".to_string(), |t| t.to_string()),
        ),
        ("monte_carlo.trials", mc.trials.to_string()),
        ("monte_carlo.seed", mc.seed.to_string()),
        ("monte_carlo.chunk_size", mc.chunk_size.to_string()),
        ("monte_carlo.parallel", mc.parallel.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| vec![key.to_string(), value])
    .collect()
}

/// Run the check command
pub fn run(path: &Path, config: &VanillaConfig) -> Result<()> {
    info!("Checking configuration...");

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not found, using defaults)", path.display());
    }

    print!("{}", render_table(&["Setting", "Value"], &settings(config)));

    config.validate()?;
    println!("Configuration OK");

    info!("Check complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_rows() {
        let mut config = VanillaConfig::default();
        config.contract.spot = Some(100.0);

        let rows = settings(&config);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[1], vec!["contract.spot".to_string(), "100".to_string()]);
        assert_eq!(rows[2][1], "(unset)");
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VanillaConfig::default();
        config.monte_carlo.trials = 0;

        assert!(run(&dir.path().join("vanilla.toml"), &config).is_err());
        assert!(run(&dir.path().join("vanilla.toml"), &VanillaConfig::default()).is_ok());
    }
}

//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `vanilla` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A contract field was given neither on the command line nor in the config file
    #[error("Missing argument: --{0} (or `{0}` under [contract] in the config file)")]
    MissingArgument(&'static str),

    /// Pricing rejected the inputs
    #[error("{0}")]
    Pricing(#[from] PricingError),

    /// JSON output failed
    #[error("Serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::MissingArgument("spot");
        assert!(err.to_string().contains("--spot"));

        let err = CliError::from(PricingError::invalid_input("T must be positive"));
        assert_eq!(err.to_string(), "Invalid input: T must be positive");
    }
}

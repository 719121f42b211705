//! Error types for the Monte Carlo engine.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for the Monte Carlo pricer.
///
/// These errors occur when a configuration is built or validated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Trial count outside [1, MAX_TRIALS].
    #[error("Invalid trial count {0}: must be in range [1, 100_000_000]")]
    InvalidTrialCount(usize),

    /// Chunk size of zero.
    #[error("Invalid chunk size {0}: must be positive")]
    InvalidChunkSize(usize),

    /// Chunk size so small the run would exceed MAX_PARTITIONS partitions.
    #[error("Chunk size {chunk_size} splits {n_trials} trials into more than 65_536 partitions")]
    TooManyPartitions {
        /// Configured trial count
        n_trials: usize,
        /// Configured chunk size
        chunk_size: usize,
    },

    /// A required builder field was never set.
    #[error("Missing parameter '{0}'")]
    MissingParameter(&'static str),
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidTrialCount(0);
        assert!(err.to_string().contains("Invalid trial count 0"));

        let err = ConfigError::InvalidChunkSize(0);
        assert!(err.to_string().contains("chunk size"));

        let err = ConfigError::TooManyPartitions {
            n_trials: 100_000_000,
            chunk_size: 1,
        };
        assert!(err.to_string().contains("65_536 partitions"));

        let err = ConfigError::MissingParameter("n_trials");
        assert_eq!(err.to_string(), "Missing parameter 'n_trials'");
    }

    #[test]
    fn test_into_pricing_error() {
        let err: PricingError = ConfigError::InvalidTrialCount(0).into();
        assert!(matches!(err, PricingError::InvalidInput(msg) if msg.contains("trial")));
    }
}

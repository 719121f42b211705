//! Monte Carlo simulation configuration.

use super::error::ConfigError;

/// Maximum number of trials allowed in a single run.
pub const MAX_TRIALS: usize = 100_000_000;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Trials per parallel partition when none is given.
pub const DEFAULT_CHUNK_SIZE: usize = 65_536;

/// Upper bound on the number of partitions in a parallel run.
pub const MAX_PARTITIONS: usize = 65_536;

/// Normal variates drawn per batch inside the simulation loop.
pub const BATCH_SIZE: usize = 4_096;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(10_000)
///     .seed(7)
///     .parallel(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.seed(), 7);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    /// Number of simulated terminal prices.
    n_trials: usize,
    /// Seed for reproducibility.
    seed: u64,
    /// Trials per partition on the parallel path.
    chunk_size: usize,
    /// Whether to spread partitions across the rayon pool.
    parallel: bool,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the partition size used on the parallel path.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns `true` if partitions run on the rayon pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` is 0 or greater than [`MAX_TRIALS`]
    /// - `chunk_size` is 0
    /// - `chunk_size` would split the run into more than [`MAX_PARTITIONS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_trials(self.n_trials)?;
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        if self.n_trials.div_ceil(self.chunk_size) > MAX_PARTITIONS {
            return Err(ConfigError::TooManyPartitions {
                n_trials: self.n_trials,
                chunk_size: self.chunk_size,
            });
        }
        Ok(())
    }
}

/// Checks a trial count against [1, MAX_TRIALS].
pub(crate) fn validate_trials(n_trials: usize) -> Result<(), ConfigError> {
    if n_trials == 0 || n_trials > MAX_TRIALS {
        return Err(ConfigError::InvalidTrialCount(n_trials));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// `n_trials` is required; everything else has a default.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_CHUNK_SIZE, DEFAULT_SEED};
///
/// let config = MonteCarloConfig::builder().n_trials(1_000).build().unwrap();
/// assert_eq!(config.seed(), DEFAULT_SEED);
/// assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
/// assert!(!config.parallel());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<usize>,
    seed: Option<u64>,
    chunk_size: Option<usize>,
    parallel: bool,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of trials, in [1, 100_000_000].
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of trials per parallel partition.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Enables or disables the parallel path.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_trials` is not set or any value is invalid.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_trials = self
            .n_trials
            .ok_or(ConfigError::MissingParameter("n_trials"))?;

        let config = MonteCarloConfig {
            n_trials,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            chunk_size: self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}

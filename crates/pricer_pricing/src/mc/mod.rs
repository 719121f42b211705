//! Monte Carlo pricing of European options.
//!
//! Terminal prices are simulated in a single step from the exact GBM
//! solution:
//!
//! ```text
//! S_T = S_0 · exp((r − σ²/2)·T + σ·√T·z),   z ~ N(0, 1)
//! ```
//!
//! and the discounted mean payoff is reported together with its standard
//! error.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloPricer
//! ├── MonteCarloConfig   (trials, seed, chunk size, parallel flag)
//! ├── PricerRng          (seeded normal source, one stream per chunk)
//! ├── PayoffAccumulator  (count, mean, M2; mergeable)
//! └── PricingResult      (discounted price, standard error)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::OptionContract;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_trials(50_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let pricer = MonteCarloPricer::new(config).unwrap();
//!
//! let contract = OptionContract::put(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
//! let first = pricer.price(&contract).unwrap();
//! let second = pricer.price(&contract).unwrap();
//!
//! // Each call reseeds from the configuration
//! assert_eq!(first, second);
//! ```

mod accumulator;
mod config;
mod error;
mod parallel;
mod pricer;

pub use accumulator::PayoffAccumulator;
pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, BATCH_SIZE, DEFAULT_CHUNK_SIZE, DEFAULT_SEED,
    MAX_PARTITIONS, MAX_TRIALS,
};
pub use error::ConfigError;
pub use parallel::{partition, Partition};
pub use pricer::{price_monte_carlo, MonteCarloPricer, PricingResult};

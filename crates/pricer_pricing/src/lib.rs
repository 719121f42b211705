//! # Pricer Engine (Layer 3: Monte Carlo)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing estimates European option values by simulating terminal
//! prices under geometric Brownian motion:
//! - Seeded, reproducible random number generation (`rng`)
//! - Single-step terminal price simulation with running statistics (`mc`)
//! - Optional parallel evaluation over independently seeded partitions
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::OptionContract;
//! use pricer_pricing::mc::price_monte_carlo;
//! use pricer_pricing::rng::PricerRng;
//!
//! let contract = OptionContract::call(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
//! let mut rng = PricerRng::from_seed(42);
//!
//! let result = price_monte_carlo(&contract, 100_000, &mut rng).unwrap();
//! assert!((result.price - 8.0214).abs() < 5.0 * result.std_error);
//! ```
//!
//! ## Reproducibility
//!
//! Every estimate is a pure function of the contract, the trial count and
//! the seed. There is no global generator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

//! # Random Number Generation Infrastructure
//!
//! Random number facilities for Monte Carlo simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators are seeded explicitly; there is no
//!   thread-local or global generator
//! - **Efficiency**: Batch operations fill caller-owned `&mut [f64]` slices
//! - **Independent streams**: [`PricerRng::stream`] derives a distinct,
//!   reproducible generator per parallel partition
//!
//! ## Module Structure
//!
//! - [`prng`]: Pseudo-random number generator wrapper with seed management
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalSource, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(12345);
//!
//! let uniform_value = rng.gen_uniform();
//! let normal_value = rng.next_normal();
//!
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

pub mod prng;

pub use prng::{NormalSource, PricerRng};

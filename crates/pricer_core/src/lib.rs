//! # pricer_core: Foundation Types for Vanilla Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The immutable option contract value type (`types::contract`)
//! - The option side enum with exhaustive payoff dispatch (`types::contract`)
//! - Error types: `PricingError`, `ContractError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Derived error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{OptionContract, OptionType};
//!
//! let contract = OptionContract::new(100.0_f64, 105.0, 1.0, 0.05, 0.2, OptionType::Call).unwrap();
//! assert_eq!(contract.strike(), 105.0);
//!
//! // Invalid inputs are rejected at construction
//! assert!(OptionContract::new(100.0_f64, 105.0, 0.0, 0.05, 0.2, OptionType::Call).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionContract` and `OptionType`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;

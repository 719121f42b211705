//! Contract and error types shared by every pricer.
//!
//! This module provides:
//! - `contract`: The `OptionContract` value object and `OptionType` enum
//! - `error`: Structured error types for contract validation and pricing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionContract`], [`OptionType`] from `contract`
//! - [`PricingError`], [`ContractError`] from `error`

pub mod contract;
pub mod error;

pub use contract::{OptionContract, OptionType};
pub use error::{ContractError, PricingError};

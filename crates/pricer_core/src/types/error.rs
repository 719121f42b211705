//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The caller-facing error returned by every pricer
//! - `ContractError`: Field-level validation failures for `OptionContract`

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Every failure a pricer can report is an input problem: the computation is
/// deterministic given valid inputs, so there is nothing to retry and no
/// partial failure to recover from.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid contract fields, trial counts, or option type strings
    InvalidInput(String),
}

impl PricingError {
    /// Creates an `InvalidInput` error from any message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Option contract validation errors.
///
/// Carries the offending value so callers can report exactly which field
/// was rejected.
///
/// # Examples
/// ```
/// use pricer_core::types::ContractError;
///
/// let err = ContractError::InvalidMaturity { maturity: 0.0 };
/// assert_eq!(format!("{}", err), "Invalid maturity: T = 0 (must be positive)");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContractError {
    /// Spot price is not a positive finite number.
    #[error("Invalid spot price: S = {spot} (must be positive)")]
    InvalidSpot {
        /// The rejected spot price
        spot: f64,
    },

    /// Strike is not a positive finite number.
    #[error("Invalid strike: K = {strike} (must be positive)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Maturity is not a positive finite number of years.
    #[error("Invalid maturity: T = {maturity} (must be positive)")]
    InvalidMaturity {
        /// The rejected maturity
        maturity: f64,
    },

    /// Volatility is not a positive finite number.
    #[error("Invalid volatility: σ = {volatility} (must be positive)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Risk-free rate is NaN or infinite.
    #[error("Invalid risk-free rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },

    /// Option type string did not name a call or a put.
    #[error("Unknown option type: '{0}' (expected 'call' or 'put')")]
    UnknownOptionType(String),
}

impl From<ContractError> for PricingError {
    fn from(err: ContractError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

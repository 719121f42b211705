//! # Pricer Models (L2: Closed-Form Pricing)
//!
//! Analytic valuation of European options under lognormal dynamics.
//!
//! This crate provides:
//! - The Black-Scholes-Merton formula for calls and puts
//! - Standard normal CDF and PDF used by the formula
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the formula evaluates in `f64` or `f32`
//! - **Validate before arithmetic**: zero volatility or maturity is an error,
//!   never a NaN or infinity in the result
//!
//! ```rust
//! use pricer_core::types::OptionContract;
//! use pricer_models::analytical::price_analytic;
//!
//! let contract = OptionContract::call(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
//! let value = price_analytic(&contract).unwrap();
//! assert!((value - 8.0214).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;

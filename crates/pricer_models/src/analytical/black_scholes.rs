//! Black-Scholes-Merton pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use pricer_core::types::{OptionContract, OptionType, PricingError};
use tracing::debug;

use super::distributions::norm_cdf;
use super::error::AnalyticalError;

/// Prices a European option with the closed-form Black-Scholes-Merton formula.
///
/// # Errors
/// `PricingError::InvalidInput` if the contract fails validation or the
/// formula does not produce a finite value.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionContract;
/// use pricer_models::analytical::price_analytic;
///
/// let call = OptionContract::call(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
/// let put = OptionContract::put(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
///
/// let c = price_analytic(&call).unwrap();
/// let p = price_analytic(&put).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = c - p - (100.0 - 105.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
pub fn price_analytic<T: Float>(contract: &OptionContract<T>) -> Result<T, PricingError> {
    let model = BlackScholes::from_contract(contract)?;
    let value = model.price(
        contract.option_type(),
        contract.strike(),
        contract.maturity(),
    )?;

    debug!(
        option_type = %contract.option_type(),
        value = value.to_f64().unwrap_or(f64::NAN),
        "analytic price"
    );

    Ok(value)
}

/// Black-Scholes model for European option pricing.
///
/// Holds the market state (spot, rate, volatility); strike and expiry are
/// supplied per valuation.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 1.0).unwrap();
///
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
///
/// // Zero expiry is rejected rather than dividing by zero
/// assert!(bs.price_call(100.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, continuously compounded)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Builds the model from a contract's market fields after revalidating it.
    ///
    /// # Errors
    /// `AnalyticalError::Contract` wrapping the first invalid field.
    pub fn from_contract(contract: &OptionContract<T>) -> Result<Self, AnalyticalError> {
        contract.validate()?;
        Self::new(contract.spot(), contract.rate(), contract.volatility())
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    fn check_terms(&self, strike: T, expiry: T) -> Result<(), AnalyticalError> {
        let zero = T::zero();
        if !(strike > zero) || !strike.is_finite() {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(expiry > zero) || !expiry.is_finite() {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Computes the (d₁, d₂) pair.
    ///
    /// # Errors
    /// `InvalidStrike` or `InvalidExpiry` for non-positive inputs.
    pub fn d1_d2(&self, strike: T, expiry: T) -> Result<(T, T), AnalyticalError> {
        self.check_terms(strike, expiry)?;

        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();

        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        let d1 = (log_moneyness + drift) / vol_sqrt_t;
        Ok((d1, d1 - vol_sqrt_t))
    }

    /// Computes d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T).
    ///
    /// # Errors
    /// `InvalidStrike` or `InvalidExpiry` for non-positive inputs.
    pub fn d1(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.d1_d2(strike, expiry).map(|(d1, _)| d1)
    }

    /// Computes d₂ = d₁ - σ√T.
    ///
    /// # Errors
    /// `InvalidStrike` or `InvalidExpiry` for non-positive inputs.
    pub fn d2(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.d1_d2(strike, expiry).map(|(_, d2)| d2)
    }

    /// Computes the European call price C = S·N(d₁) - K·e^(-rT)·N(d₂).
    ///
    /// # Errors
    /// See [`BlackScholes::price`].
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionType::Call, strike, expiry)
    }

    /// Computes the European put price P = K·e^(-rT)·N(-d₂) - S·N(-d₁).
    ///
    /// # Errors
    /// See [`BlackScholes::price`].
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        self.price(OptionType::Put, strike, expiry)
    }

    /// Computes the European option price for either side.
    ///
    /// # Errors
    /// - `InvalidStrike` / `InvalidExpiry` for non-positive inputs
    /// - `NonFiniteResult` if the evaluation overflows
    pub fn price(
        &self,
        option_type: OptionType,
        strike: T,
        expiry: T,
    ) -> Result<T, AnalyticalError> {
        let (d1, d2) = self.d1_d2(strike, expiry)?;
        let discounted_strike = strike * (-self.rate * expiry).exp();

        let value = match option_type {
            OptionType::Call => self.spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            OptionType::Put => discounted_strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        };

        if !value.is_finite() {
            return Err(AnalyticalError::NonFiniteResult {
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(value)
    }
}

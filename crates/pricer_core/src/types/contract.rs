//! European option contract definition.
//!
//! [`OptionContract`] is the single input every pricer consumes. It is
//! immutable: fields are private, validated on construction, and the
//! `with_*` methods return a new validated contract instead of mutating.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::ContractError;

/// Option side.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
///
/// assert_eq!("Call".parse::<OptionType>().unwrap(), OptionType::Call);
/// assert_eq!(OptionType::Put.payoff(90.0_f64, 100.0), 10.0);
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "lowercase", try_from = "String")
)]
pub enum OptionType {
    /// Right to buy at the strike: max(S - K, 0)
    Call,
    /// Right to sell at the strike: max(K - S, 0)
    Put,
}

impl OptionType {
    /// Evaluates the payoff at expiry for a terminal price and strike.
    #[inline]
    pub fn payoff<T: Float>(self, terminal: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            OptionType::Call => (terminal - strike).max(zero),
            OptionType::Put => (strike - terminal).max(zero),
        }
    }

    /// Returns `true` for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ContractError::UnknownOptionType(s.to_string())),
        }
    }
}

impl TryFrom<String> for OptionType {
    type Error = ContractError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A European option on a single underlying.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Invariants
/// - `spot`, `strike`, `maturity` and `volatility` are positive and finite
/// - `rate` is finite (negative rates are accepted)
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionContract, OptionType};
///
/// let call = OptionContract::call(100.0_f64, 105.0, 1.0, 0.05, 0.2).unwrap();
/// let put = call.with_option_type(OptionType::Put);
///
/// assert_eq!(put.option_type(), OptionType::Put);
/// assert_eq!(put.spot(), call.spot());
/// assert!((call.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "ContractFields<T>",
        bound(
            serialize = "T: serde::Serialize",
            deserialize = "T: Float + serde::Deserialize<'de>"
        )
    )
)]
pub struct OptionContract<T: Float> {
    spot: T,
    strike: T,
    maturity: T,
    rate: T,
    volatility: T,
    option_type: OptionType,
}

/// Unvalidated wire shape; deserialisation funnels through `OptionContract::new`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ContractFields<T> {
    spot: T,
    strike: T,
    maturity: T,
    #[serde(alias = "risk_free_rate", alias = "riskFreeRate")]
    rate: T,
    volatility: T,
    option_type: OptionType,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<ContractFields<T>> for OptionContract<T> {
    type Error = ContractError;

    fn try_from(fields: ContractFields<T>) -> Result<Self, Self::Error> {
        OptionContract::new(
            fields.spot,
            fields.strike,
            fields.maturity,
            fields.rate,
            fields.volatility,
            fields.option_type,
        )
    }
}

impl<T: Float> OptionContract<T> {
    /// Creates a new contract with validation.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price S0 (must be positive)
    /// * `strike` - Strike price K (must be positive)
    /// * `maturity` - Time to expiry T in years (must be positive)
    /// * `rate` - Continuously compounded risk-free rate r (must be finite)
    /// * `volatility` - Annualised volatility σ (must be positive)
    /// * `option_type` - Call or put
    ///
    /// # Errors
    /// Returns the `ContractError` variant naming the first rejected field.
    pub fn new(
        spot: T,
        strike: T,
        maturity: T,
        rate: T,
        volatility: T,
        option_type: OptionType,
    ) -> Result<Self, ContractError> {
        let contract = Self {
            spot,
            strike,
            maturity,
            rate,
            volatility,
            option_type,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Creates a call contract.
    pub fn call(
        spot: T,
        strike: T,
        maturity: T,
        rate: T,
        volatility: T,
    ) -> Result<Self, ContractError> {
        Self::new(spot, strike, maturity, rate, volatility, OptionType::Call)
    }

    /// Creates a put contract.
    pub fn put(
        spot: T,
        strike: T,
        maturity: T,
        rate: T,
        volatility: T,
    ) -> Result<Self, ContractError> {
        Self::new(spot, strike, maturity, rate, volatility, OptionType::Put)
    }

    /// Checks every field invariant.
    ///
    /// # Errors
    /// - `ContractError::InvalidSpot` if spot <= 0 or not finite
    /// - `ContractError::InvalidStrike` if strike <= 0 or not finite
    /// - `ContractError::InvalidMaturity` if maturity <= 0 or not finite
    /// - `ContractError::InvalidVolatility` if volatility <= 0 or not finite
    /// - `ContractError::InvalidRate` if rate is not finite
    pub fn validate(&self) -> Result<(), ContractError> {
        if !is_positive(self.spot) {
            return Err(ContractError::InvalidSpot {
                spot: as_f64(self.spot),
            });
        }
        if !is_positive(self.strike) {
            return Err(ContractError::InvalidStrike {
                strike: as_f64(self.strike),
            });
        }
        if !is_positive(self.maturity) {
            return Err(ContractError::InvalidMaturity {
                maturity: as_f64(self.maturity),
            });
        }
        if !is_positive(self.volatility) {
            return Err(ContractError::InvalidVolatility {
                volatility: as_f64(self.volatility),
            });
        }
        if !self.rate.is_finite() {
            return Err(ContractError::InvalidRate {
                rate: as_f64(self.rate),
            });
        }
        Ok(())
    }

    /// Returns the spot price S0.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike K.
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry T in years.
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns the risk-free rate r.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility σ.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-self.rate * self.maturity).exp()
    }

    /// Payoff at expiry for a given terminal underlying price.
    #[inline]
    pub fn payoff(&self, terminal: T) -> T {
        self.option_type.payoff(terminal, self.strike)
    }

    /// Returns a copy with a different spot.
    ///
    /// # Errors
    /// `ContractError::InvalidSpot` if the new spot is not positive.
    pub fn with_spot(&self, spot: T) -> Result<Self, ContractError> {
        Self::new(
            spot,
            self.strike,
            self.maturity,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Returns a copy with a different strike.
    ///
    /// # Errors
    /// `ContractError::InvalidStrike` if the new strike is not positive.
    pub fn with_strike(&self, strike: T) -> Result<Self, ContractError> {
        Self::new(
            self.spot,
            strike,
            self.maturity,
            self.rate,
            self.volatility,
            self.option_type,
        )
    }

    /// Returns a copy with a different volatility.
    ///
    /// # Errors
    /// `ContractError::InvalidVolatility` if the new volatility is not positive.
    pub fn with_volatility(&self, volatility: T) -> Result<Self, ContractError> {
        Self::new(
            self.spot,
            self.strike,
            self.maturity,
            self.rate,
            volatility,
            self.option_type,
        )
    }

    /// Returns a copy on the other side (or the same side).
    ///
    /// Infallible: the numeric fields are already validated.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }
}

#[inline]
fn is_positive<T: Float>(value: T) -> bool {
    value.is_finite() && value > T::zero()
}

#[inline]
fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

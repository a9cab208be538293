//! Option payoff definitions.

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// assert_eq!(OptionType::Put.sign(), -1.0);
/// assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// +1 for a call, -1 for a put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(format!("unknown option type: {}", other)),
        }
    }
}

/// Striked payoff.
///
/// The Monte Carlo path pricers accept only [`Payoff::PlainVanilla`]; the
/// digital variants are priced elsewhere and are rejected there.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, Payoff};
///
/// let call = Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap();
/// assert_eq!(call.value(110.0), 10.0);
/// assert_eq!(call.value(90.0), 0.0);
///
/// let digital = Payoff::cash_or_nothing(OptionType::Put, 100.0, 5.0).unwrap();
/// assert_eq!(digital.value(90.0), 5.0);
/// assert!(!digital.is_plain_vanilla());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// max(±(S - K), 0)
    PlainVanilla {
        /// Call or put
        option_type: OptionType,
        /// Strike
        strike: f64,
    },
    /// Fixed cash if in the money
    CashOrNothing {
        /// Call or put
        option_type: OptionType,
        /// Strike
        strike: f64,
        /// Cash paid
        cash: f64,
    },
    /// The asset if in the money
    AssetOrNothing {
        /// Call or put
        option_type: OptionType,
        /// Strike
        strike: f64,
    },
}

fn checked_strike(strike: f64) -> Result<f64, InstrumentError> {
    if strike.is_finite() && strike >= 0.0 {
        Ok(strike)
    } else {
        Err(InstrumentError::InvalidStrike { strike })
    }
}

impl Payoff {
    /// Plain vanilla payoff.
    pub fn plain_vanilla(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        Ok(Payoff::PlainVanilla {
            option_type,
            strike: checked_strike(strike)?,
        })
    }

    /// Cash-or-nothing digital payoff.
    pub fn cash_or_nothing(
        option_type: OptionType,
        strike: f64,
        cash: f64,
    ) -> Result<Self, InstrumentError> {
        if !cash.is_finite() || cash < 0.0 {
            return Err(InstrumentError::InvalidCash { cash });
        }
        Ok(Payoff::CashOrNothing {
            option_type,
            strike: checked_strike(strike)?,
            cash,
        })
    }

    /// Asset-or-nothing digital payoff.
    pub fn asset_or_nothing(option_type: OptionType, strike: f64) -> Result<Self, InstrumentError> {
        Ok(Payoff::AssetOrNothing {
            option_type,
            strike: checked_strike(strike)?,
        })
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        match self {
            Payoff::PlainVanilla { option_type, .. }
            | Payoff::CashOrNothing { option_type, .. }
            | Payoff::AssetOrNothing { option_type, .. } => *option_type,
        }
    }

    /// Strike.
    pub fn strike(&self) -> f64 {
        match self {
            Payoff::PlainVanilla { strike, .. }
            | Payoff::CashOrNothing { strike, .. }
            | Payoff::AssetOrNothing { strike, .. } => *strike,
        }
    }

    /// Whether this is [`Payoff::PlainVanilla`].
    pub fn is_plain_vanilla(&self) -> bool {
        matches!(self, Payoff::PlainVanilla { .. })
    }

    /// Payoff name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Payoff::PlainVanilla { .. } => "PlainVanilla",
            Payoff::CashOrNothing { .. } => "CashOrNothing",
            Payoff::AssetOrNothing { .. } => "AssetOrNothing",
        }
    }

    /// Undiscounted payoff at spot `spot`.
    pub fn value(&self, spot: f64) -> f64 {
        let sign = self.option_type().sign();
        let in_the_money = sign * (spot - self.strike()) > 0.0;
        match self {
            Payoff::PlainVanilla { strike, .. } => (sign * (spot - strike)).max(0.0),
            Payoff::CashOrNothing { cash, .. } => {
                if in_the_money {
                    *cash
                } else {
                    0.0
                }
            }
            Payoff::AssetOrNothing { .. } => {
                if in_the_money {
                    spot
                } else {
                    0.0
                }
            }
        }
    }
}

//! Path pricers: one simulated path in, one discounted payoff out.
//!
//! Discount factors are computed once, when the pricer is built for a
//! product, and never per path.

use pricer_models::instruments::{OptionType, Payoff};

use super::error::PricingEngineError;
use super::path::Path;

/// Maps a simulated path to a discounted payoff sample.
pub trait PathPricer: Send + Sync {
    /// Discounted payoff of `path`.
    ///
    /// # Errors
    /// `InvalidPath` for an empty path.
    fn price(&self, path: &Path) -> Result<f64, PricingEngineError>;
}

fn plain_vanilla(payoff: &Payoff) -> Result<(OptionType, f64), PricingEngineError> {
    match payoff {
        Payoff::PlainVanilla {
            option_type,
            strike,
        } => Ok((*option_type, *strike)),
        other => Err(PricingEngineError::InvalidPayoff {
            payoff: other.name(),
        }),
    }
}

fn terminal(path: &Path) -> Result<f64, PricingEngineError> {
    path.back()
        .ok_or_else(|| PricingEngineError::invalid_path("path has no values"))
}

/// European vanilla payoff on the terminal value.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::mc::{EuropeanPathPricer, Path, PathPricer, TimeGrid};
///
/// let pricer = EuropeanPathPricer::new(OptionType::Call, 100.0, 1.0);
/// let grid = TimeGrid::uniform(1.0, 1).unwrap();
/// let path = Path::with_values(grid, vec![100.0, 110.0]);
/// assert_eq!(pricer.price(&path).unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuropeanPathPricer {
    option_type: OptionType,
    strike: f64,
    discount: f64,
}

impl EuropeanPathPricer {
    /// Pricer for a known option type, strike and discount factor.
    pub fn new(option_type: OptionType, strike: f64, discount: f64) -> Self {
        Self {
            option_type,
            strike,
            discount,
        }
    }

    /// Pricer for a plain-vanilla `payoff`.
    ///
    /// # Errors
    /// `InvalidPayoff` for any other payoff kind.
    pub fn from_payoff(payoff: &Payoff, discount: f64) -> Result<Self, PricingEngineError> {
        let (option_type, strike) = plain_vanilla(payoff)?;
        Ok(Self::new(option_type, strike, discount))
    }

    /// Discount factor applied to every payoff.
    pub fn discount(&self) -> f64 {
        self.discount
    }
}

impl PathPricer for EuropeanPathPricer {
    #[inline]
    fn price(&self, path: &Path) -> Result<f64, PricingEngineError> {
        let last = terminal(path)?;
        let intrinsic = (self.option_type.sign() * (last - self.strike)).max(0.0);
        Ok(intrinsic * self.discount)
    }
}

/// Arithmetic average-strike payoff: terminal value against the average of
/// all fixings, past and simulated.
///
/// Fixings before the simulation start enter through `running_sum` and
/// `past_fixings`. The path's first value counts as a fixing only when its
/// grid has `t = 0` as a mandatory time; otherwise it is just the starting
/// point of the simulation.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::OptionType;
/// use pricer_pricing::mc::{ArithmeticAsoPathPricer, Path, PathPricer, TimeGrid};
///
/// // One past fixing at 50 plus one simulated fixing at 150: strike 100.
/// let pricer = ArithmeticAsoPathPricer::new(OptionType::Call, 1.0, 50.0, 1);
/// let grid = TimeGrid::from_mandatory_times(&[1.0]).unwrap();
/// let path = Path::with_values(grid, vec![120.0, 150.0]);
/// assert_eq!(pricer.price(&path).unwrap(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArithmeticAsoPathPricer {
    option_type: OptionType,
    discount: f64,
    running_sum: f64,
    past_fixings: usize,
}

impl ArithmeticAsoPathPricer {
    /// Pricer with explicit average seed.
    pub fn new(
        option_type: OptionType,
        discount: f64,
        running_sum: f64,
        past_fixings: usize,
    ) -> Self {
        Self {
            option_type,
            discount,
            running_sum,
            past_fixings,
        }
    }

    /// Pricer for a plain-vanilla `payoff`. The strike is ignored.
    ///
    /// # Errors
    /// `InvalidPayoff` for any other payoff kind.
    pub fn from_payoff(
        payoff: &Payoff,
        discount: f64,
        running_sum: f64,
        past_fixings: usize,
    ) -> Result<Self, PricingEngineError> {
        let (option_type, _) = plain_vanilla(payoff)?;
        Ok(Self::new(option_type, discount, running_sum, past_fixings))
    }

    /// Arithmetic average of past and simulated fixings.
    pub fn average(&self, path: &Path) -> Result<f64, PricingEngineError> {
        let values = path.values();
        if values.is_empty() {
            return Err(PricingEngineError::invalid_path("path has no values"));
        }
        let fixings = if path.grid().starts_with_mandatory_zero() {
            values
        } else {
            &values[1..]
        };
        let count = self.past_fixings + fixings.len();
        if count == 0 {
            return Err(PricingEngineError::invalid_path("no fixings to average"));
        }
        let sum = self.running_sum + fixings.iter().sum::<f64>();
        Ok(sum / count as f64)
    }
}

impl PathPricer for ArithmeticAsoPathPricer {
    fn price(&self, path: &Path) -> Result<f64, PricingEngineError> {
        let last = terminal(path)?;
        let average = self.average(path)?;
        let intrinsic = (self.option_type.sign() * (last - average)).max(0.0);
        Ok(intrinsic * self.discount)
    }
}

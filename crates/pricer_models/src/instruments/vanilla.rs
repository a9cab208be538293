//! Vanilla option instrument.

use super::exercise::Exercise;
use super::payoff::Payoff;

/// Single-asset option with a striked payoff and an exercise schedule.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Exercise, OptionType, Payoff, VanillaOption};
///
/// let expiry = Date::from_ymd(2027, 1, 4).unwrap();
/// let option = VanillaOption::new(
///     Payoff::plain_vanilla(OptionType::Call, 100.0).unwrap(),
///     Exercise::european(expiry),
/// );
/// assert_eq!(option.exercise().last_date(), expiry);
/// assert_eq!(option.payoff().strike(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaOption {
    payoff: Payoff,
    exercise: Exercise,
}

impl VanillaOption {
    /// Option paying `payoff` under `exercise`.
    pub fn new(payoff: Payoff, exercise: Exercise) -> Self {
        Self { payoff, exercise }
    }

    /// Payoff.
    #[inline]
    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    /// Exercise schedule.
    #[inline]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }
}

//! Discretely monitored averaging option.

use pricer_core::types::Date;

use super::error::InstrumentError;
use super::exercise::Exercise;
use super::payoff::Payoff;

/// Asian option averaging the underlying over discrete fixing dates.
///
/// Fixings that happened before the valuation date are carried as a running
/// sum (`running_accumulator`) and a count (`past_fixings`); `fixing_dates`
/// lists every fixing date, past or future. The average-strike variant pays
/// `max(±(S_T − A), 0)` where `A` is the arithmetic average of all fixings.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{
///     DiscreteAveragingAsianOption, Exercise, OptionType, Payoff,
/// };
///
/// let dates: Vec<Date> = (1..=4)
///     .map(|m| Date::from_ymd(2026, 3 * m, 30).unwrap())
///     .collect();
/// let option = DiscreteAveragingAsianOption::new(
///     Payoff::plain_vanilla(OptionType::Call, 0.0).unwrap(),
///     Exercise::european(dates[3]),
///     0.0,
///     0,
///     dates.clone(),
/// ).unwrap();
/// assert_eq!(option.fixing_dates(), dates.as_slice());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteAveragingAsianOption {
    payoff: Payoff,
    exercise: Exercise,
    running_accumulator: f64,
    past_fixings: usize,
    fixing_dates: Vec<Date>,
}

impl DiscreteAveragingAsianOption {
    /// Averaging option; `fixing_dates` are sorted on construction.
    ///
    /// # Errors
    /// `NoFixingDates` for an empty schedule, `InvalidRunningAccumulator` for
    /// a negative or non-finite running sum.
    pub fn new(
        payoff: Payoff,
        exercise: Exercise,
        running_accumulator: f64,
        past_fixings: usize,
        mut fixing_dates: Vec<Date>,
    ) -> Result<Self, InstrumentError> {
        if fixing_dates.is_empty() {
            return Err(InstrumentError::NoFixingDates);
        }
        if !running_accumulator.is_finite() || running_accumulator < 0.0 {
            return Err(InstrumentError::InvalidRunningAccumulator {
                value: running_accumulator,
            });
        }
        fixing_dates.sort();
        Ok(Self {
            payoff,
            exercise,
            running_accumulator,
            past_fixings,
            fixing_dates,
        })
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

    /// Sum of fixings observed before the valuation date.
    #[inline]
    pub fn running_accumulator(&self) -> f64 {
        self.running_accumulator
    }

    /// Number of fixings observed before the valuation date.
    #[inline]
    pub fn past_fixings(&self) -> usize {
        self.past_fixings
    }

    /// Sorted fixing dates.
    #[inline]
    pub fn fixing_dates(&self) -> &[Date] {
        &self.fixing_dates
    }
}

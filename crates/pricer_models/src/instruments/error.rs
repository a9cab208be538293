//! Instrument error types.
//!
//! Structured errors for instrument construction.

use pricer_core::types::Date;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: Strike price is negative or not finite
/// - `InvalidCash`: Digital cash amount is negative or not finite
/// - `InvalidExerciseWindow`: American window ends before it starts
/// - `NoExerciseDates`: Bermudan exercise without dates
/// - `NoFixingDates`: Averaging option without fixings
/// - `InvalidRunningAccumulator`: Past fixing sum is negative or not finite
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid digital cash amount.
    #[error("Invalid cash amount: {cash}")]
    InvalidCash {
        /// The invalid cash value
        cash: f64,
    },

    /// Exercise window ends before it starts.
    #[error("Invalid exercise window: {earliest} is after {latest}")]
    InvalidExerciseWindow {
        /// First exercise date
        earliest: Date,
        /// Last exercise date
        latest: Date,
    },

    /// No exercise dates supplied.
    #[error("Exercise requires at least one date")]
    NoExerciseDates,

    /// No fixing dates supplied.
    #[error("Averaging option requires at least one fixing date")]
    NoFixingDates,

    /// Invalid running accumulator for past fixings.
    #[error("Invalid running accumulator: {value}")]
    InvalidRunningAccumulator {
        /// The invalid accumulator value
        value: f64,
    },
}

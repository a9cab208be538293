//! Market data error types.
//!
//! Structured errors for quote lookups and term structure queries.

use crate::types::InterpolationError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `MissingQuote`: A quote has no value set
/// - `InvalidQuote`: A quote holds a non-finite value
/// - `InvalidMaturity`: Negative or non-finite time
/// - `InvalidStrike`: Negative or non-finite strike
/// - `OutOfBounds`: Query beyond the curve range without extrapolation
/// - `DecreasingVariance`: Total variance falls between two times
/// - `Interpolation`: Wrapped interpolation error
/// - `InsufficientData`: Not enough data points for construction
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidMaturity { t: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Quote has not been given a value.
    #[error("Missing quote value")]
    MissingQuote,

    /// Quote value is not a finite number.
    #[error("Invalid quote value: {value}")]
    InvalidQuote {
        /// The rejected value
        value: f64,
    },

    /// Invalid maturity (negative time).
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Invalid strike price.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Query point outside valid domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Total variance decreases between two times.
    #[error("Decreasing total variance between t = {t1} and t = {t2}")]
    DecreasingVariance {
        /// Earlier time
        t1: f64,
        /// Later time
        t2: f64,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },
}

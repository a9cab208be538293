//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for converting dates to year fractions
//! - `error`: Structured error types for date and interpolation operations

pub mod error;
pub mod time;

pub use error::{DateError, InterpolationError};
pub use time::{Date, DayCountConvention};

//! Flat forward yield curve.

use crate::market_data::error::MarketDataError;
use crate::market_data::quote::QuoteHandle;
use crate::types::{Date, DayCountConvention};

use super::YieldTermStructure;

#[derive(Debug, Clone)]
enum FlatRate {
    Fixed(f64),
    Quoted(QuoteHandle),
}

/// Yield curve with a single continuously compounded rate at all maturities.
///
/// The rate is either fixed at construction or read from a shared quote on
/// every query, so a quoted curve follows market updates.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::{FlatForward, YieldTermStructure};
/// use pricer_core::market_data::SimpleQuote;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let rate = Arc::new(SimpleQuote::new(0.03));
/// let curve = FlatForward::with_quote(today, rate.clone(), DayCountConvention::ActualActual365);
///
/// rate.set_value(0.04).unwrap();
/// let df = curve.discount(2.0, false).unwrap();
/// assert!((df - (-0.08_f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FlatForward {
    reference_date: Date,
    day_counter: DayCountConvention,
    rate: FlatRate,
}

impl FlatForward {
    /// Curve at a fixed rate.
    pub fn new(reference_date: Date, rate: f64, day_counter: DayCountConvention) -> Self {
        Self {
            reference_date,
            day_counter,
            rate: FlatRate::Fixed(rate),
        }
    }

    /// Curve whose rate tracks `quote`.
    pub fn with_quote(
        reference_date: Date,
        quote: QuoteHandle,
        day_counter: DayCountConvention,
    ) -> Self {
        Self {
            reference_date,
            day_counter,
            rate: FlatRate::Quoted(quote),
        }
    }

    /// Current rate.
    pub fn rate(&self) -> Result<f64, MarketDataError> {
        match &self.rate {
            FlatRate::Fixed(r) => Ok(*r),
            FlatRate::Quoted(q) => q.value(),
        }
    }
}

impl YieldTermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> DayCountConvention {
        self.day_counter
    }

    fn discount_impl(&self, t: f64) -> Result<f64, MarketDataError> {
        Ok((-self.rate()? * t).exp())
    }
}

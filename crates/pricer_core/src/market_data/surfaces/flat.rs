//! Constant Black volatility.

use crate::market_data::error::MarketDataError;
use crate::market_data::quote::QuoteHandle;
use crate::types::{Date, DayCountConvention};

use super::BlackVolTermStructure;

#[derive(Debug, Clone)]
enum FlatVolatility {
    Fixed(f64),
    Quoted(QuoteHandle),
}

/// Black volatility independent of time and strike.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::surfaces::{BlackConstantVol, BlackVolTermStructure};
/// use pricer_core::market_data::SimpleQuote;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let quote = Arc::new(SimpleQuote::new(0.25));
/// let vol = BlackConstantVol::with_quote(today, quote.clone(), DayCountConvention::ActualActual365);
///
/// quote.set_value(0.30).unwrap();
/// assert_eq!(vol.black_vol(0.5, 90.0, false).unwrap(), 0.30);
/// ```
#[derive(Debug, Clone)]
pub struct BlackConstantVol {
    reference_date: Date,
    day_counter: DayCountConvention,
    volatility: FlatVolatility,
}

impl BlackConstantVol {
    /// Fixed volatility.
    pub fn new(reference_date: Date, volatility: f64, day_counter: DayCountConvention) -> Self {
        Self {
            reference_date,
            day_counter,
            volatility: FlatVolatility::Fixed(volatility),
        }
    }

    /// Volatility tracking `quote`.
    pub fn with_quote(
        reference_date: Date,
        quote: QuoteHandle,
        day_counter: DayCountConvention,
    ) -> Self {
        Self {
            reference_date,
            day_counter,
            volatility: FlatVolatility::Quoted(quote),
        }
    }

    fn volatility(&self) -> Result<f64, MarketDataError> {
        match &self.volatility {
            FlatVolatility::Fixed(v) => Ok(*v),
            FlatVolatility::Quoted(q) => q.value(),
        }
    }
}

impl BlackVolTermStructure for BlackConstantVol {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> DayCountConvention {
        self.day_counter
    }

    fn black_variance_impl(&self, t: f64, _strike: f64) -> Result<f64, MarketDataError> {
        let v = self.volatility()?;
        Ok(v * v * t)
    }

    fn black_vol_impl(&self, _t: f64, _strike: f64) -> Result<f64, MarketDataError> {
        self.volatility()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vol() -> BlackConstantVol {
        BlackConstantVol::new(
            Date::from_ymd(2026, 1, 2).unwrap(),
            0.2,
            DayCountConvention::ActualActual365,
        )
    }

    #[test]
    fn test_vol_at_time_zero() {
        assert_eq!(vol().black_vol(0.0, 100.0, false).unwrap(), 0.2);
    }

    #[test]
    fn test_forward_variance() {
        let v = vol();
        assert_relative_eq!(
            v.black_forward_variance(1.0, 3.0, 100.0, false).unwrap(),
            0.08,
            epsilon = 1e-12
        );
        assert_relative_eq!(v.black_forward_vol(1.0, 1.0, 100.0, false).unwrap(), 0.2, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_queries() {
        let v = vol();
        assert!(matches!(
            v.black_vol(-1.0, 100.0, true),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            v.black_vol(1.0, f64::NAN, true),
            Err(MarketDataError::InvalidStrike { .. })
        ));
        assert!(v.black_forward_variance(2.0, 1.0, 100.0, true).is_err());
    }

    #[test]
    fn test_vol_by_date() {
        let v = vol();
        let date = Date::from_ymd(2027, 1, 2).unwrap();
        assert_eq!(v.black_vol_date(date, 100.0, false).unwrap(), 0.2);
    }
}

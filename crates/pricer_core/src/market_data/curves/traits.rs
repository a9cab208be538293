//! Yield term structure trait definition.

use std::fmt;
use std::sync::Arc;

use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Time step used to turn an instantaneous rate query into a finite one.
pub const INSTANTANEOUS_DT: f64 = 1.0e-4;

/// Yield term structure anchored at a reference date.
///
/// Times are year fractions from [`reference_date`](Self::reference_date)
/// measured with [`day_counter`](Self::day_counter). Implementors only
/// provide [`discount_impl`](Self::discount_impl); range checks and rate
/// conversions are shared.
///
/// # Contract
///
/// - `discount(t)` fails with `InvalidMaturity` for negative or non-finite `t`
/// - `discount(t)` fails with `OutOfBounds` for `t > max_time()` unless
///   `extrapolate` is set
/// - D(0) = 1
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatForward, YieldTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let curve = FlatForward::new(today, 0.05, DayCountConvention::ActualActual365);
///
/// let df = curve.discount(1.0, false).unwrap();
/// assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
///
/// let r = curve.zero_rate(0.0, false).unwrap();
/// assert!((r - 0.05).abs() < 1e-10);
/// ```
pub trait YieldTermStructure: Send + Sync + fmt::Debug {
    /// Date at which `t = 0`.
    fn reference_date(&self) -> Date;

    /// Convention turning dates into times.
    fn day_counter(&self) -> DayCountConvention;

    /// Latest time for which the curve holds data.
    fn max_time(&self) -> f64 {
        f64::INFINITY
    }

    /// Discount factor at a time already validated by the caller.
    fn discount_impl(&self, t: f64) -> Result<f64, MarketDataError>;

    /// Rejects negative times and, without `extrapolate`, times past `max_time()`.
    fn check_range(&self, t: f64, extrapolate: bool) -> Result<(), MarketDataError> {
        if !t.is_finite() || t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        let max = self.max_time();
        if !extrapolate && t > max {
            return Err(MarketDataError::OutOfBounds {
                x: t,
                min: 0.0,
                max,
            });
        }
        Ok(())
    }

    /// Discount factor D(t).
    fn discount(&self, t: f64, extrapolate: bool) -> Result<f64, MarketDataError> {
        self.check_range(t, extrapolate)?;
        self.discount_impl(t)
    }

    /// Continuously compounded zero rate to `t`.
    ///
    /// At `t = 0` the rate over the first [`INSTANTANEOUS_DT`] is returned.
    fn zero_rate(&self, t: f64, extrapolate: bool) -> Result<f64, MarketDataError> {
        let t = if t == 0.0 { INSTANTANEOUS_DT } else { t };
        let df = self.discount(t, extrapolate)?;
        Ok(-df.ln() / t)
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    ///
    /// Equal times give the instantaneous forward, approximated over a
    /// window of [`INSTANTANEOUS_DT`] centred on `t1` (floored at zero).
    fn forward_rate(&self, t1: f64, t2: f64, extrapolate: bool) -> Result<f64, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity { t: t2 });
        }
        let (t1, t2) = if t2 == t1 {
            let start = (t1 - INSTANTANEOUS_DT / 2.0).max(0.0);
            (start, start + INSTANTANEOUS_DT)
        } else {
            (t1, t2)
        };
        let df1 = self.discount(t1, extrapolate)?;
        let df2 = self.discount(t2, extrapolate)?;
        Ok((df1 / df2).ln() / (t2 - t1))
    }

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_counter().year_fraction(self.reference_date(), date)
    }

    /// Discount factor to `date`.
    fn discount_date(&self, date: Date, extrapolate: bool) -> Result<f64, MarketDataError> {
        self.discount(self.time_from_reference(date), extrapolate)
    }

    /// Continuously compounded zero rate to `date`, quoted on `day_counter`.
    ///
    /// A query at the reference date returns the instantaneous rate.
    fn zero_rate_date(
        &self,
        date: Date,
        day_counter: DayCountConvention,
        extrapolate: bool,
    ) -> Result<f64, MarketDataError> {
        if date == self.reference_date() {
            return self.zero_rate(0.0, extrapolate);
        }
        let df = self.discount_date(date, extrapolate)?;
        let t = day_counter.year_fraction(self.reference_date(), date);
        if t <= 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(-df.ln() / t)
    }
}

/// Shared handle to a yield term structure.
pub type YieldTermStructureHandle = Arc<dyn YieldTermStructure>;

//! Black volatility term structure trait definition.

use std::fmt;
use std::sync::Arc;

use crate::market_data::curves::INSTANTANEOUS_DT;
use crate::market_data::error::MarketDataError;
use crate::types::{Date, DayCountConvention};

/// Smallest time used when a volatility is recovered from total variance.
const MIN_VOL_TIME: f64 = 1.0e-5;

/// Black (implied) volatility term structure.
///
/// Implementors provide total variance through
/// [`black_variance_impl`](Self::black_variance_impl); volatility, forward
/// variance and date-based queries are derived from it.
///
/// # Contract
///
/// - `black_variance(t, K)` is non-decreasing in `t` with value 0 at `t = 0`
/// - negative or non-finite `t` fails with `InvalidMaturity`
/// - negative or non-finite strike fails with `InvalidStrike`
/// - `t > max_time()` fails with `OutOfBounds` unless `extrapolate` is set
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{BlackConstantVol, BlackVolTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let vol = BlackConstantVol::new(today, 0.20, DayCountConvention::ActualActual365);
///
/// assert_eq!(vol.black_vol(1.0, 100.0, false).unwrap(), 0.20);
/// assert!((vol.black_variance(2.0, 100.0, false).unwrap() - 0.08).abs() < 1e-12);
/// ```
pub trait BlackVolTermStructure: Send + Sync + fmt::Debug {
    /// Date at which `t = 0`.
    fn reference_date(&self) -> Date;

    /// Convention turning dates into times.
    fn day_counter(&self) -> DayCountConvention;

    /// Latest time for which the structure holds data.
    fn max_time(&self) -> f64 {
        f64::INFINITY
    }

    /// Total Black variance σ²(t)·t at a validated time.
    fn black_variance_impl(&self, t: f64, strike: f64) -> Result<f64, MarketDataError>;

    /// Black volatility at a validated time.
    fn black_vol_impl(&self, t: f64, strike: f64) -> Result<f64, MarketDataError> {
        let t = t.max(MIN_VOL_TIME);
        Ok((self.black_variance_impl(t, strike)? / t).sqrt())
    }

    /// Validates a (time, strike) query.
    fn check_range(&self, t: f64, strike: f64, extrapolate: bool) -> Result<(), MarketDataError> {
        if !t.is_finite() || t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        if !strike.is_finite() || strike < 0.0 {
            return Err(MarketDataError::InvalidStrike { strike });
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

    /// Black volatility for maturity `t` and `strike`.
    fn black_vol(&self, t: f64, strike: f64, extrapolate: bool) -> Result<f64, MarketDataError> {
        self.check_range(t, strike, extrapolate)?;
        self.black_vol_impl(t, strike)
    }

    /// Total Black variance for maturity `t` and `strike`.
    fn black_variance(
        &self,
        t: f64,
        strike: f64,
        extrapolate: bool,
    ) -> Result<f64, MarketDataError> {
        self.check_range(t, strike, extrapolate)?;
        self.black_variance_impl(t, strike)
    }

    /// Total variance accrued between `t1` and `t2`.
    ///
    /// # Errors
    /// `InvalidMaturity` if `t2 < t1`; `DecreasingVariance` if the structure
    /// implies negative forward variance.
    fn black_forward_variance(
        &self,
        t1: f64,
        t2: f64,
        strike: f64,
        extrapolate: bool,
    ) -> Result<f64, MarketDataError> {
        if t2 < t1 {
            return Err(MarketDataError::InvalidMaturity { t: t2 });
        }
        let v1 = self.black_variance(t1, strike, extrapolate)?;
        let v2 = self.black_variance(t2, strike, extrapolate)?;
        let fwd = v2 - v1;
        // Tolerate round-off from equal variances.
        if fwd < -1.0e-14 {
            return Err(MarketDataError::DecreasingVariance { t1, t2 });
        }
        Ok(fwd.max(0.0))
    }

    /// Forward Black volatility between `t1` and `t2`.
    ///
    /// Equal times give the local forward volatility over a window of
    /// [`INSTANTANEOUS_DT`] starting at `t1`.
    fn black_forward_vol(
        &self,
        t1: f64,
        t2: f64,
        strike: f64,
        extrapolate: bool,
    ) -> Result<f64, MarketDataError> {
        let t2 = if t2 == t1 { t1 + INSTANTANEOUS_DT } else { t2 };
        let var = self.black_forward_variance(t1, t2, strike, extrapolate)?;
        Ok((var / (t2 - t1)).sqrt())
    }

    /// Year fraction from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_counter().year_fraction(self.reference_date(), date)
    }

    /// Black volatility at `date` and `strike`.
    fn black_vol_date(
        &self,
        date: Date,
        strike: f64,
        extrapolate: bool,
    ) -> Result<f64, MarketDataError> {
        self.black_vol(self.time_from_reference(date), strike, extrapolate)
    }
}

/// Shared handle to a Black volatility term structure.
pub type BlackVolTermStructureHandle = Arc<dyn BlackVolTermStructure>;

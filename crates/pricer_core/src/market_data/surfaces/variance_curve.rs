//! Black volatility term structure built from a volatility term curve.

use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::{Date, DayCountConvention};

use super::BlackVolTermStructure;

/// Strike-independent Black volatility curve.
///
/// Input volatilities are converted to total variances σ²·t, which are
/// interpolated linearly in time from a zero variance at `t = 0`. Past the last
/// pillar the last volatility is held constant.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::surfaces::{BlackVarianceCurve, BlackVolTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let curve = BlackVarianceCurve::from_times(
///     today,
///     &[1.0, 2.0],
///     &[0.20, 0.25],
///     DayCountConvention::ActualActual365,
/// ).unwrap();
///
/// let var = curve.black_variance(1.5, 100.0, false).unwrap();
/// assert!((var - 0.5 * (0.04 + 0.125)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BlackVarianceCurve {
    reference_date: Date,
    day_counter: DayCountConvention,
    variances: LinearInterpolator,
}

impl BlackVarianceCurve {
    /// Curve from expiry dates and their Black volatilities.
    pub fn new(
        reference_date: Date,
        dates: &[Date],
        volatilities: &[f64],
        day_counter: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        let times: Vec<f64> = dates
            .iter()
            .map(|d| day_counter.year_fraction(reference_date, *d))
            .collect();
        Self::from_times(reference_date, &times, volatilities, day_counter)
    }

    /// Curve from expiry times in years.
    ///
    /// # Errors
    /// `InvalidMaturity` for non-positive times, `InsufficientData` for an
    /// empty curve, `DecreasingVariance` if total variance falls.
    pub fn from_times(
        reference_date: Date,
        times: &[f64],
        volatilities: &[f64],
        day_counter: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if times.is_empty() || times.len() != volatilities.len() {
            return Err(MarketDataError::InsufficientData {
                got: times.len().min(volatilities.len()),
                need: 1,
            });
        }
        if let Some(&t) = times.iter().find(|t| **t <= 0.0) {
            return Err(MarketDataError::InvalidMaturity { t });
        }

        let mut xs = Vec::with_capacity(times.len() + 1);
        let mut ys = Vec::with_capacity(times.len() + 1);
        xs.push(0.0);
        ys.push(0.0);
        for (&t, &v) in times.iter().zip(volatilities) {
            xs.push(t);
            ys.push(v * v * t);
        }

        let variances = LinearInterpolator::new(&xs, &ys)?;
        let (sorted_t, sorted_v) = (variances.xs(), variances.ys());
        for i in 1..sorted_t.len() {
            if sorted_v[i] < sorted_v[i - 1] {
                return Err(MarketDataError::DecreasingVariance {
                    t1: sorted_t[i - 1],
                    t2: sorted_t[i],
                });
            }
        }

        Ok(Self {
            reference_date,
            day_counter,
            variances,
        })
    }
}

impl BlackVolTermStructure for BlackVarianceCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> DayCountConvention {
        self.day_counter
    }

    fn max_time(&self) -> f64 {
        self.variances.domain().1
    }

    fn black_variance_impl(&self, t: f64, _strike: f64) -> Result<f64, MarketDataError> {
        let t_max = self.max_time();
        if t <= t_max {
            return Ok(self.variances.interpolate(t)?);
        }
        // Constant volatility beyond the last pillar.
        let last = self.variances.interpolate(t_max)?;
        Ok(last * t / t_max)
    }
}

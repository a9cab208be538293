//! Zero curve interpolated over pillar dates.

use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::{Date, DayCountConvention};

use super::YieldTermStructure;

/// Yield curve defined by continuously compounded zero rates at pillars.
///
/// Zero rates are interpolated linearly in time and held flat before the
/// first and after the last pillar. `max_time()` is the last pillar, so
/// queries beyond it need `extrapolate = true`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{InterpolatedZeroCurve, YieldTermStructure};
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let curve = InterpolatedZeroCurve::from_times(
///     today,
///     &[0.5, 1.0, 2.0],
///     &[0.02, 0.03, 0.04],
///     DayCountConvention::ActualActual365,
/// ).unwrap();
///
/// let z = curve.zero_rate(1.5, false).unwrap();
/// assert!((z - 0.035).abs() < 1e-12);
/// assert!(curve.discount(3.0, false).is_err());
/// assert!(curve.discount(3.0, true).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedZeroCurve {
    reference_date: Date,
    day_counter: DayCountConvention,
    interpolator: LinearInterpolator,
}

impl InterpolatedZeroCurve {
    /// Curve from pillar dates and their zero rates.
    ///
    /// # Errors
    /// `InvalidMaturity` for pillars before the reference date; interpolation
    /// errors for fewer than two pillars or duplicates.
    pub fn new(
        reference_date: Date,
        dates: &[Date],
        rates: &[f64],
        day_counter: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        let times: Vec<f64> = dates
            .iter()
            .map(|d| day_counter.year_fraction(reference_date, *d))
            .collect();
        Self::from_times(reference_date, &times, rates, day_counter)
    }

    /// Curve from pillar times in years.
    pub fn from_times(
        reference_date: Date,
        times: &[f64],
        rates: &[f64],
        day_counter: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        if let Some(&t) = times.iter().find(|t| **t < 0.0) {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        let interpolator = LinearInterpolator::new(times, rates)?;
        Ok(Self {
            reference_date,
            day_counter,
            interpolator,
        })
    }

    /// Pillar times.
    pub fn times(&self) -> &[f64] {
        self.interpolator.xs()
    }
}

impl YieldTermStructure for InterpolatedZeroCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> DayCountConvention {
        self.day_counter
    }

    fn max_time(&self) -> f64 {
        self.interpolator.domain().1
    }

    fn discount_impl(&self, t: f64) -> Result<f64, MarketDataError> {
        let z = self.interpolator.interpolate_flat(t);
        Ok((-z * t).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn today() -> Date {
        Date::from_ymd(2026, 1, 2).unwrap()
    }

    fn curve() -> InterpolatedZeroCurve {
        InterpolatedZeroCurve::from_times(
            today(),
            &[1.0, 2.0, 5.0],
            &[0.02, 0.025, 0.03],
            DayCountConvention::ActualActual365,
        )
        .unwrap()
    }

    #[test]
    fn test_pillar_rates_reproduced() {
        let c = curve();
        assert_relative_eq!(c.zero_rate(2.0, false).unwrap(), 0.025, epsilon = 1e-12);
        assert_relative_eq!(c.zero_rate(5.0, false).unwrap(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_before_first_pillar() {
        let c = curve();
        assert_relative_eq!(c.zero_rate(0.0, false).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(c.zero_rate(0.5, false).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_extrapolation_flag() {
        let c = curve();
        assert!(matches!(
            c.discount(6.0, false),
            Err(MarketDataError::OutOfBounds { .. })
        ));
        assert_relative_eq!(c.zero_rate(6.0, true).unwrap(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_from_dates() {
        let dates = [today().add_days(365), today().add_days(730)];
        let c = InterpolatedZeroCurve::new(
            today(),
            &dates,
            &[0.01, 0.02],
            DayCountConvention::ActualActual365,
        )
        .unwrap();
        assert_eq!(c.times(), &[1.0, 2.0]);
        assert_relative_eq!(c.max_time(), 2.0);
    }

    #[test]
    fn test_rejects_pillar_before_reference() {
        let result = InterpolatedZeroCurve::from_times(
            today(),
            &[-1.0, 1.0],
            &[0.01, 0.02],
            DayCountConvention::ActualActual365,
        );
        assert_eq!(result.unwrap_err(), MarketDataError::InvalidMaturity { t: -1.0 });
    }

    #[test]
    fn test_rejects_single_pillar() {
        let result = InterpolatedZeroCurve::from_times(
            today(),
            &[1.0],
            &[0.01],
            DayCountConvention::ActualActual365,
        );
        assert!(matches!(result, Err(MarketDataError::Interpolation(_))));
    }
}

//! Integration tests for the market data layer.
//!
//! Verifies that the public types are reachable through their module paths
//! and that shared quotes propagate to every structure built on them.

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::{
    BlackConstantVol, BlackVarianceCurve, BlackVolTermStructure, FlatForward,
    InterpolatedZeroCurve, MarketDataError, Quote, QuoteHandle, SimpleQuote, YieldTermStructure,
};
use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
use pricer_core::types::{Date, DateError, DayCountConvention};

fn today() -> Date {
    Date::from_ymd(2026, 1, 2).unwrap()
}

#[test]
fn test_shared_quote_reaches_every_consumer() {
    let rate = Arc::new(SimpleQuote::new(0.03));
    let handle: QuoteHandle = rate.clone();
    let dc = DayCountConvention::ActualActual365;
    let curve = FlatForward::with_quote(today(), handle.clone(), dc);
    let vol = BlackConstantVol::with_quote(today(), handle, dc);

    assert_relative_eq!(curve.zero_rate(2.0, false).unwrap(), 0.03, epsilon = 1e-12);
    assert_relative_eq!(vol.black_vol(2.0, 100.0, false).unwrap(), 0.03, epsilon = 1e-12);

    rate.set_value(0.04).unwrap();
    assert_relative_eq!(curve.zero_rate(2.0, false).unwrap(), 0.04, epsilon = 1e-12);
    assert_relative_eq!(vol.black_vol(2.0, 100.0, false).unwrap(), 0.04, epsilon = 1e-12);

    rate.reset();
    assert_eq!(curve.discount(1.0, false), Err(MarketDataError::MissingQuote));
    assert!(!rate.is_valid());
}

#[test]
fn test_date_helpers_use_day_count() {
    let dc = DayCountConvention::ActualActual360;
    let curve = FlatForward::new(today(), 0.05, dc);
    let in_360_days = today().add_days(360);

    assert_relative_eq!(curve.time_from_reference(in_360_days), 1.0);
    assert_relative_eq!(
        curve.discount_date(in_360_days, false).unwrap(),
        (-0.05_f64).exp(),
        epsilon = 1e-14
    );
    assert_relative_eq!(
        curve
            .zero_rate_date(in_360_days, DayCountConvention::ActualActual365, false)
            .unwrap(),
        0.05 * 365.0 / 360.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_interpolated_curve_forward_consistency() {
    let dc = DayCountConvention::ActualActual365;
    let curve = InterpolatedZeroCurve::from_times(today(), &[0.5, 1.0, 2.0], &[0.02, 0.03, 0.035], dc)
        .unwrap();

    let f = curve.forward_rate(1.0, 2.0, false).unwrap();
    let d1 = curve.discount(1.0, false).unwrap();
    let d2 = curve.discount(2.0, false).unwrap();
    assert_relative_eq!(d1 * (-f).exp(), d2, epsilon = 1e-14);

    assert!(matches!(
        curve.discount(3.0, false),
        Err(MarketDataError::OutOfBounds { .. })
    ));
    assert_relative_eq!(curve.zero_rate(3.0, true).unwrap(), 0.035, epsilon = 1e-12);
    assert!(matches!(
        curve.discount(-0.1, true),
        Err(MarketDataError::InvalidMaturity { .. })
    ));
}

#[test]
fn test_variance_curve_forward_variance() {
    let dc = DayCountConvention::ActualActual365;
    let curve = BlackVarianceCurve::from_times(today(), &[1.0, 2.0], &[0.2, 0.25], dc).unwrap();

    let forward = curve.black_forward_variance(1.0, 2.0, 100.0, false).unwrap();
    assert_relative_eq!(forward, 0.25 * 0.25 * 2.0 - 0.2 * 0.2, epsilon = 1e-14);
    assert_relative_eq!(curve.black_vol(0.5, 100.0, false).unwrap(), 0.2, epsilon = 1e-12);

    let decreasing = BlackVarianceCurve::from_times(today(), &[1.0, 2.0], &[0.3, 0.1], dc);
    assert!(matches!(
        decreasing,
        Err(MarketDataError::DecreasingVariance { .. })
    ));
}

#[test]
fn test_interpolator_and_date_exports() {
    let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
    assert_relative_eq!(interp.interpolate(0.25).unwrap(), 0.5);

    assert!(matches!(
        Date::parse("2026-02-30"),
        Err(DateError::ParseError(_))
    ));
    assert_eq!(Date::parse("2026-01-02").unwrap(), today());
}

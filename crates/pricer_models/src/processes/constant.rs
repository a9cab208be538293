//! Black-Scholes-Merton process with parameters frozen at construction.
//!
//! The spot, risk-free rate, dividend yield and Black volatility are read
//! once at the evaluation date and kept as scalars. All dynamics use the
//! exact geometric Brownian motion step:
//! ```text
//! μ = r - q - ½σ²
//! S(t+dt) = S(t) · exp(μ·dt + σ·√dt·dW)
//! ```
//! Later changes to the market inputs do not affect the snapshot. The
//! handles are kept for discounting and date-to-time conversion only.

use pricer_core::market_data::{
    BlackVolTermStructureHandle, QuoteHandle, YieldTermStructureHandle,
};
use pricer_core::types::Date;
use tracing::debug;

use super::error::ProcessError;
use super::generalized::GeneralizedBlackScholesProcess;
use super::traits::{BlackScholesProcess, StochasticProcess1D};

fn finite(input: &'static str, value: f64) -> Result<f64, ProcessError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProcessError::NonFinite { input, value })
    }
}

/// Constant-parameter Black-Scholes-Merton process.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::processes::{ConstantBlackScholesProcess, StochasticProcess1D};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let dc = DayCountConvention::ActualActual365;
/// let spot = Arc::new(SimpleQuote::new(100.0));
///
/// let process = ConstantBlackScholesProcess::new(
///     spot.clone(),
///     Arc::new(FlatForward::new(today, 0.05, dc)),
///     Arc::new(FlatForward::new(today, 0.0, dc)),
///     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
///     today,
/// ).unwrap();
///
/// spot.set_value(120.0).unwrap();
/// assert_eq!(process.x0(), 100.0);
/// assert!((process.drift(0.0, 100.0) - 0.03).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct ConstantBlackScholesProcess {
    x0: f64,
    risk_free: f64,
    dividend: f64,
    volatility: f64,
    evaluation_date: Date,
    state_variable: QuoteHandle,
    risk_free_rate: YieldTermStructureHandle,
    dividend_yield: YieldTermStructureHandle,
    black_volatility: BlackVolTermStructureHandle,
}

impl ConstantBlackScholesProcess {
    /// Snapshot the market inputs at `evaluation_date`.
    ///
    /// Rates are continuously compounded zero rates to the evaluation date on
    /// each curve's own day count (the instantaneous rate when the evaluation
    /// date is the curve reference date). The volatility is the Black
    /// volatility at the evaluation date struck at the spot. Extrapolation is
    /// allowed for all three.
    ///
    /// # Errors
    /// `ProcessError::Evaluation` if any input cannot be evaluated,
    /// `ProcessError::NonFinite` if an input evaluates to NaN or infinity.
    pub fn new(
        x0: QuoteHandle,
        risk_free_rate: YieldTermStructureHandle,
        dividend_yield: YieldTermStructureHandle,
        black_volatility: BlackVolTermStructureHandle,
        evaluation_date: Date,
    ) -> Result<Self, ProcessError> {
        let spot = x0.value().map_err(ProcessError::evaluation("spot"))?;
        let spot = finite("spot", spot)?;

        let risk_free = risk_free_rate
            .zero_rate_date(evaluation_date, risk_free_rate.day_counter(), true)
            .map_err(ProcessError::evaluation("risk-free rate"))?;
        let risk_free = finite("risk-free rate", risk_free)?;

        let dividend = dividend_yield
            .zero_rate_date(evaluation_date, dividend_yield.day_counter(), true)
            .map_err(ProcessError::evaluation("dividend yield"))?;
        let dividend = finite("dividend yield", dividend)?;

        let volatility = black_volatility
            .black_vol_date(evaluation_date, spot, true)
            .map_err(ProcessError::evaluation("volatility"))?;
        let volatility = finite("volatility", volatility)?;

        debug!(
            %evaluation_date,
            spot,
            risk_free,
            dividend,
            volatility,
            "froze Black-Scholes parameters"
        );

        Ok(Self {
            x0: spot,
            risk_free,
            dividend,
            volatility,
            evaluation_date,
            state_variable: x0,
            risk_free_rate,
            dividend_yield,
            black_volatility,
        })
    }

    /// Snapshot the inputs of a time-varying process.
    pub fn from_process(
        process: &GeneralizedBlackScholesProcess,
        evaluation_date: Date,
    ) -> Result<Self, ProcessError> {
        Self::new(
            process.state_variable().clone(),
            process.risk_free_rate().clone(),
            process.dividend_yield().clone(),
            process.black_volatility().clone(),
            evaluation_date,
        )
    }

    /// Frozen continuously compounded risk-free rate.
    #[inline]
    pub fn constant_risk_free_rate(&self) -> f64 {
        self.risk_free
    }

    /// Frozen continuously compounded dividend yield.
    #[inline]
    pub fn constant_dividend_yield(&self) -> f64 {
        self.dividend
    }

    /// Frozen Black volatility.
    #[inline]
    pub fn constant_volatility(&self) -> f64 {
        self.volatility
    }

    /// Date at which the snapshot was taken.
    #[inline]
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }
}

impl StochasticProcess1D for ConstantBlackScholesProcess {
    #[inline]
    fn x0(&self) -> f64 {
        self.x0
    }

    #[inline]
    fn drift(&self, _t: f64, _x: f64) -> f64 {
        self.risk_free - self.dividend - 0.5 * self.volatility * self.volatility
    }

    #[inline]
    fn diffusion(&self, _t: f64, _x: f64) -> f64 {
        self.volatility
    }

    #[inline]
    fn expectation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        x0 * (self.drift(t0, x0) * dt).exp()
    }

    #[inline]
    fn std_deviation(&self, _t0: f64, _x0: f64, dt: f64) -> f64 {
        self.volatility * dt.sqrt()
    }

    #[inline]
    fn variance(&self, _t0: f64, _x0: f64, dt: f64) -> f64 {
        self.volatility * self.volatility * dt
    }

    #[inline]
    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> f64 {
        x0 * (self.drift(t0, x0) * dt + self.volatility * dt.sqrt() * dw).exp()
    }
}

impl BlackScholesProcess for ConstantBlackScholesProcess {
    fn state_variable(&self) -> &QuoteHandle {
        &self.state_variable
    }

    fn risk_free_rate(&self) -> &YieldTermStructureHandle {
        &self.risk_free_rate
    }

    fn dividend_yield(&self) -> &YieldTermStructureHandle {
        &self.dividend_yield
    }

    fn black_volatility(&self) -> &BlackVolTermStructureHandle {
        &self.black_volatility
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{
        BlackConstantVol, BlackVarianceCurve, FlatForward, InterpolatedZeroCurve,
        MarketDataError, SimpleQuote,
    };
    use pricer_core::types::DayCountConvention;
    use proptest::prelude::*;
    use std::sync::Arc;

    const DC: DayCountConvention = DayCountConvention::ActualActual365;

    fn today() -> Date {
        Date::from_ymd(2026, 1, 2).unwrap()
    }

    struct Market {
        spot: Arc<SimpleQuote>,
        rate: Arc<SimpleQuote>,
        vol: Arc<SimpleQuote>,
    }

    fn market() -> Market {
        Market {
            spot: Arc::new(SimpleQuote::new(100.0)),
            rate: Arc::new(SimpleQuote::new(0.05)),
            vol: Arc::new(SimpleQuote::new(0.2)),
        }
    }

    fn snapshot(m: &Market) -> ConstantBlackScholesProcess {
        ConstantBlackScholesProcess::new(
            m.spot.clone(),
            Arc::new(FlatForward::with_quote(today(), m.rate.clone(), DC)),
            Arc::new(FlatForward::new(today(), 0.01, DC)),
            Arc::new(BlackConstantVol::with_quote(today(), m.vol.clone(), DC)),
            today(),
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_values() {
        let p = snapshot(&market());
        assert_eq!(p.x0(), 100.0);
        assert_relative_eq!(p.constant_risk_free_rate(), 0.05, epsilon = 1e-12);
        assert_relative_eq!(p.constant_dividend_yield(), 0.01, epsilon = 1e-12);
        assert_eq!(p.constant_volatility(), 0.2);
        assert_eq!(p.evaluation_date(), today());
    }

    #[test]
    fn test_coefficients_ignore_time_and_level() {
        let p = snapshot(&market());
        let mu = 0.05 - 0.01 - 0.5 * 0.04;
        for (t, x) in [(0.0, 100.0), (3.0, 1.0), (10.0, 500.0)] {
            assert_relative_eq!(p.drift(t, x), mu, epsilon = 1e-12);
            assert_eq!(p.diffusion(t, x), 0.2);
        }
    }

    #[test]
    fn test_snapshot_isolated_from_market_updates() {
        let m = market();
        let p = snapshot(&m);
        let before = (p.x0(), p.drift(0.0, 100.0), p.evolve(0.0, 100.0, 1.0, 0.3));

        m.spot.set_value(150.0).unwrap();
        m.rate.set_value(0.10).unwrap();
        m.vol.set_value(0.45).unwrap();

        let after = (p.x0(), p.drift(0.0, 100.0), p.evolve(0.0, 100.0, 1.0, 0.3));
        assert_eq!(before, after);
        // The handles still see the update.
        assert_eq!(p.state_variable().value().unwrap(), 150.0);
    }

    #[test]
    fn test_evolve_exact_step() {
        let p = snapshot(&market());
        let (dt, dw) = (0.25, -1.2);
        let expected = 100.0 * (p.drift(0.0, 100.0) * dt + 0.2 * dt.sqrt() * dw).exp();
        assert_eq!(p.evolve(0.0, 100.0, dt, dw), expected);
    }

    #[test]
    fn test_evaluation_date_after_reference() {
        let curve = InterpolatedZeroCurve::from_times(today(), &[1.0, 2.0], &[0.02, 0.04], DC)
            .unwrap();
        let vol = BlackVarianceCurve::from_times(today(), &[1.0, 2.0], &[0.2, 0.3], DC).unwrap();
        let later = today().add_days(365 + 183);
        let p = ConstantBlackScholesProcess::new(
            Arc::new(SimpleQuote::new(100.0)),
            Arc::new(curve),
            Arc::new(FlatForward::new(today(), 0.0, DC)),
            Arc::new(vol),
            later,
        )
        .unwrap();
        let t = 548.0 / 365.0;
        assert_relative_eq!(p.constant_risk_free_rate(), 0.02 + 0.02 * (t - 1.0), epsilon = 1e-12);
        let var = 0.04 + (0.18 - 0.04) * (t - 1.0);
        assert_relative_eq!(p.constant_volatility(), (var / t).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_missing_spot_is_evaluation_error() {
        let err = ConstantBlackScholesProcess::new(
            Arc::new(SimpleQuote::empty()),
            Arc::new(FlatForward::new(today(), 0.05, DC)),
            Arc::new(FlatForward::new(today(), 0.0, DC)),
            Arc::new(BlackConstantVol::new(today(), 0.2, DC)),
            today(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProcessError::Evaluation {
                input: "spot",
                source: MarketDataError::MissingQuote
            }
        );
    }

    #[test]
    fn test_evaluation_before_reference_fails() {
        let err = ConstantBlackScholesProcess::new(
            Arc::new(SimpleQuote::new(100.0)),
            Arc::new(FlatForward::new(today(), 0.05, DC)),
            Arc::new(FlatForward::new(today(), 0.0, DC)),
            Arc::new(BlackConstantVol::new(today(), 0.2, DC)),
            today().add_days(-10),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Evaluation {
                input: "risk-free rate",
                ..
            }
        ));
    }

    proptest! {
        #[test]
        fn prop_expectation_identity(
            r in -0.02f64..0.15,
            sigma in 0.01f64..1.0,
            x0 in 1.0f64..500.0,
            t0 in 0.0f64..5.0,
            dt in 0.0f64..5.0,
        ) {
            let p = ConstantBlackScholesProcess::new(
                Arc::new(SimpleQuote::new(x0)),
                Arc::new(FlatForward::new(today(), r, DC)),
                Arc::new(FlatForward::new(today(), 0.0, DC)),
                Arc::new(BlackConstantVol::new(today(), sigma, DC)),
                today(),
            ).unwrap();
            prop_assert_eq!(p.expectation(t0, x0, dt), x0 * (p.drift(t0, x0) * dt).exp());
            let sd = p.std_deviation(t0, x0, dt);
            prop_assert!((p.variance(t0, x0, dt) - sd * sd).abs() <= 1e-12 * (1.0 + sd * sd));
        }
    }
}

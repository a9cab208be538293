//! Static dispatch over the process variants an engine can simulate.
//!
//! The choice between frozen and time-varying parameters is made once when
//! an engine is built; per-step calls dispatch through `match`.

use pricer_core::market_data::{
    BlackVolTermStructureHandle, QuoteHandle, YieldTermStructureHandle,
};
use pricer_core::types::Date;

use super::constant::ConstantBlackScholesProcess;
use super::error::ProcessError;
use super::generalized::GeneralizedBlackScholesProcess;
use super::traits::{BlackScholesProcess, StochasticProcess1D};

/// Process driving a Monte Carlo engine.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::processes::{EngineProcess, GeneralizedBlackScholesProcess};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let dc = DayCountConvention::ActualActual365;
/// let process = GeneralizedBlackScholesProcess::new(
///     Arc::new(SimpleQuote::new(100.0)),
///     Arc::new(FlatForward::new(today, 0.0, dc)),
///     Arc::new(FlatForward::new(today, 0.05, dc)),
///     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
/// );
///
/// let frozen = EngineProcess::from_process(&process, true, today).unwrap();
/// assert!(frozen.is_constant());
/// assert_eq!(frozen.name(), "ConstantBlackScholes");
///
/// let live = EngineProcess::from_process(&process, false, today).unwrap();
/// assert!(!live.is_constant());
/// ```
#[derive(Debug, Clone)]
pub enum EngineProcess {
    /// Parameters frozen at the evaluation date
    Constant(ConstantBlackScholesProcess),
    /// Parameters read from the term structures at every step
    TimeVarying(GeneralizedBlackScholesProcess),
}

impl EngineProcess {
    /// Select the variant for `process`.
    ///
    /// With `constant_parameters` the inputs are snapshotted at
    /// `evaluation_date`; otherwise the process is used unchanged.
    pub fn from_process(
        process: &GeneralizedBlackScholesProcess,
        constant_parameters: bool,
        evaluation_date: Date,
    ) -> Result<Self, ProcessError> {
        if constant_parameters {
            ConstantBlackScholesProcess::from_process(process, evaluation_date)
                .map(EngineProcess::Constant)
        } else {
            Ok(EngineProcess::TimeVarying(process.clone()))
        }
    }

    /// Whether the parameters are frozen.
    pub fn is_constant(&self) -> bool {
        matches!(self, EngineProcess::Constant(_))
    }

    /// Variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            EngineProcess::Constant(_) => "ConstantBlackScholes",
            EngineProcess::TimeVarying(_) => "GeneralizedBlackScholes",
        }
    }
}

impl From<ConstantBlackScholesProcess> for EngineProcess {
    fn from(process: ConstantBlackScholesProcess) -> Self {
        EngineProcess::Constant(process)
    }
}

impl From<GeneralizedBlackScholesProcess> for EngineProcess {
    fn from(process: GeneralizedBlackScholesProcess) -> Self {
        EngineProcess::TimeVarying(process)
    }
}

impl StochasticProcess1D for EngineProcess {
    #[inline]
    fn x0(&self) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.x0(),
            EngineProcess::TimeVarying(p) => p.x0(),
        }
    }

    #[inline]
    fn drift(&self, t: f64, x: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.drift(t, x),
            EngineProcess::TimeVarying(p) => p.drift(t, x),
        }
    }

    #[inline]
    fn diffusion(&self, t: f64, x: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.diffusion(t, x),
            EngineProcess::TimeVarying(p) => p.diffusion(t, x),
        }
    }

    #[inline]
    fn expectation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.expectation(t0, x0, dt),
            EngineProcess::TimeVarying(p) => p.expectation(t0, x0, dt),
        }
    }

    #[inline]
    fn std_deviation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.std_deviation(t0, x0, dt),
            EngineProcess::TimeVarying(p) => p.std_deviation(t0, x0, dt),
        }
    }

    #[inline]
    fn variance(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.variance(t0, x0, dt),
            EngineProcess::TimeVarying(p) => p.variance(t0, x0, dt),
        }
    }

    #[inline]
    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> f64 {
        match self {
            EngineProcess::Constant(p) => p.evolve(t0, x0, dt, dw),
            EngineProcess::TimeVarying(p) => p.evolve(t0, x0, dt, dw),
        }
    }
}

impl BlackScholesProcess for EngineProcess {
    fn state_variable(&self) -> &QuoteHandle {
        match self {
            EngineProcess::Constant(p) => p.state_variable(),
            EngineProcess::TimeVarying(p) => p.state_variable(),
        }
    }

    fn risk_free_rate(&self) -> &YieldTermStructureHandle {
        match self {
            EngineProcess::Constant(p) => p.risk_free_rate(),
            EngineProcess::TimeVarying(p) => p.risk_free_rate(),
        }
    }

    fn dividend_yield(&self) -> &YieldTermStructureHandle {
        match self {
            EngineProcess::Constant(p) => p.dividend_yield(),
            EngineProcess::TimeVarying(p) => p.dividend_yield(),
        }
    }

    fn black_volatility(&self) -> &BlackVolTermStructureHandle {
        match self {
            EngineProcess::Constant(p) => p.black_volatility(),
            EngineProcess::TimeVarying(p) => p.black_volatility(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
    use pricer_core::types::DayCountConvention;
    use std::sync::Arc;

    fn today() -> Date {
        Date::from_ymd(2026, 1, 2).unwrap()
    }

    fn process(spot: Arc<SimpleQuote>) -> GeneralizedBlackScholesProcess {
        let dc = DayCountConvention::ActualActual365;
        GeneralizedBlackScholesProcess::new(
            spot,
            Arc::new(FlatForward::new(today(), 0.0, dc)),
            Arc::new(FlatForward::new(today(), 0.05, dc)),
            Arc::new(BlackConstantVol::new(today(), 0.2, dc)),
        )
    }

    #[test]
    fn test_variants_agree_on_flat_market() {
        let p = process(Arc::new(SimpleQuote::new(100.0)));
        let frozen = EngineProcess::from_process(&p, true, today()).unwrap();
        let live = EngineProcess::from_process(&p, false, today()).unwrap();
        assert_relative_eq!(
            frozen.evolve(0.0, 100.0, 0.5, 0.4),
            live.evolve(0.0, 100.0, 0.5, 0.4),
            epsilon = 1e-9
        );
        assert_relative_eq!(frozen.variance(0.0, 100.0, 1.0), live.variance(0.0, 100.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_only_time_varying_sees_spot_update() {
        let spot = Arc::new(SimpleQuote::new(100.0));
        let p = process(spot.clone());
        let frozen = EngineProcess::from_process(&p, true, today()).unwrap();
        let live = EngineProcess::from_process(&p, false, today()).unwrap();
        spot.set_value(80.0).unwrap();
        assert_eq!(frozen.x0(), 100.0);
        assert_eq!(live.x0(), 80.0);
    }

    #[test]
    fn test_time_uses_risk_free_day_count() {
        let p = process(Arc::new(SimpleQuote::new(100.0)));
        let e = EngineProcess::from(p);
        assert_relative_eq!(e.time(today().add_days(73)), 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_snapshot_failure_propagates() {
        let p = process(Arc::new(SimpleQuote::empty()));
        assert!(EngineProcess::from_process(&p, true, today()).is_err());
        assert!(EngineProcess::from_process(&p, false, today()).is_ok());
    }
}

//! Black-Scholes-Merton process with time-dependent market inputs.
//!
//! Every query goes back to the term structures, so a change to a quote
//! behind the spot, a curve or the volatility is seen by the next call:
//! ```text
//! d ln S = (r(t) - q(t) - ½σ(t)²) dt + σ(t) dW
//! ```
//! Market data failures inside a step query surface as NaN.

use pricer_core::market_data::curves::INSTANTANEOUS_DT;
use pricer_core::market_data::{
    BlackVolTermStructureHandle, MarketDataError, QuoteHandle, YieldTermStructureHandle,
};

use super::traits::{BlackScholesProcess, StochasticProcess1D};

#[inline]
fn or_nan(value: Result<f64, MarketDataError>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// Time-varying Black-Scholes-Merton process.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
/// use pricer_core::types::{Date, DayCountConvention};
/// use pricer_models::processes::{GeneralizedBlackScholesProcess, StochasticProcess1D};
///
/// let today = Date::from_ymd(2026, 1, 2).unwrap();
/// let dc = DayCountConvention::ActualActual365;
/// let spot = Arc::new(SimpleQuote::new(100.0));
/// let process = GeneralizedBlackScholesProcess::new(
///     spot.clone(),
///     Arc::new(FlatForward::new(today, 0.0, dc)),
///     Arc::new(FlatForward::new(today, 0.05, dc)),
///     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
/// );
///
/// spot.set_value(110.0).unwrap();
/// assert_eq!(process.x0(), 110.0);
/// ```
#[derive(Debug, Clone)]
pub struct GeneralizedBlackScholesProcess {
    x0: QuoteHandle,
    dividend_yield: YieldTermStructureHandle,
    risk_free_rate: YieldTermStructureHandle,
    black_volatility: BlackVolTermStructureHandle,
}

impl GeneralizedBlackScholesProcess {
    /// Process over the given spot, dividend, risk-free and volatility inputs.
    pub fn new(
        x0: QuoteHandle,
        dividend_yield: YieldTermStructureHandle,
        risk_free_rate: YieldTermStructureHandle,
        black_volatility: BlackVolTermStructureHandle,
    ) -> Self {
        Self {
            x0,
            dividend_yield,
            risk_free_rate,
            black_volatility,
        }
    }

    /// Risk-free minus dividend forward rate over `[t1, t2]`.
    fn carry(&self, t1: f64, t2: f64) -> Result<f64, MarketDataError> {
        let r = self.risk_free_rate.forward_rate(t1, t2, true)?;
        let q = self.dividend_yield.forward_rate(t1, t2, true)?;
        Ok(r - q)
    }
}

impl StochasticProcess1D for GeneralizedBlackScholesProcess {
    fn x0(&self) -> f64 {
        or_nan(self.x0.value())
    }

    fn drift(&self, t: f64, x: f64) -> f64 {
        let sigma = self.diffusion(t, x);
        let t1 = t + INSTANTANEOUS_DT;
        or_nan(self.carry(t, t1)) - 0.5 * sigma * sigma
    }

    fn diffusion(&self, t: f64, x: f64) -> f64 {
        or_nan(self.black_volatility.black_forward_vol(t, t, x, true))
    }

    fn expectation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        x0 * (or_nan(self.carry(t0, t0 + dt)) * dt).exp()
    }

    fn std_deviation(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        self.variance(t0, x0, dt).sqrt()
    }

    fn variance(&self, t0: f64, x0: f64, dt: f64) -> f64 {
        or_nan(
            self.black_volatility
                .black_forward_variance(t0, t0 + dt, x0, true),
        )
    }

    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> f64 {
        let var = self.variance(t0, x0, dt);
        let drift = or_nan(self.carry(t0, t0 + dt)) * dt - 0.5 * var;
        x0 * (drift + var.sqrt() * dw).exp()
    }
}

impl BlackScholesProcess for GeneralizedBlackScholesProcess {
    fn state_variable(&self) -> &QuoteHandle {
        &self.x0
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

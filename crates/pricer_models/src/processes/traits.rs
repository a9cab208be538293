//! Capability traits shared by every Black-Scholes process variant.
//!
//! The Monte Carlo machinery only sees [`StochasticProcess1D`]; engines
//! additionally need the market handles exposed by [`BlackScholesProcess`]
//! for discounting and for turning dates into simulation times.

use std::fmt;

use pricer_core::market_data::{
    BlackVolTermStructureHandle, QuoteHandle, YieldTermStructureHandle,
};
use pricer_core::types::Date;

/// One-dimensional diffusion `dX = μ(t, X) dt + σ(t, X) dW`.
///
/// For the log-normal processes in this crate `drift` and `diffusion` are the
/// coefficients of `d ln S`, and [`evolve`](Self::evolve) applies the exact
/// integrated step to the asset level.
pub trait StochasticProcess1D: Send + Sync + fmt::Debug {
    /// Initial value of the process.
    fn x0(&self) -> f64;

    /// Drift coefficient at `(t, x)`.
    fn drift(&self, t: f64, x: f64) -> f64;

    /// Diffusion coefficient at `(t, x)`.
    fn diffusion(&self, t: f64, x: f64) -> f64;

    /// Expected value at `t0 + dt` given `x0` at `t0`.
    fn expectation(&self, t0: f64, x0: f64, dt: f64) -> f64;

    /// Standard deviation of the step from `t0` to `t0 + dt`.
    fn std_deviation(&self, t0: f64, x0: f64, dt: f64) -> f64;

    /// Variance of the step from `t0` to `t0 + dt`.
    fn variance(&self, t0: f64, x0: f64, dt: f64) -> f64;

    /// Value at `t0 + dt` given `x0` at `t0` and a standard normal draw `dw`.
    fn evolve(&self, t0: f64, x0: f64, dt: f64, dw: f64) -> f64;
}

/// Black-Scholes-Merton process with access to its market inputs.
pub trait BlackScholesProcess: StochasticProcess1D {
    /// Underlying spot quote.
    fn state_variable(&self) -> &QuoteHandle;

    /// Risk-free discount curve.
    fn risk_free_rate(&self) -> &YieldTermStructureHandle;

    /// Dividend yield curve.
    fn dividend_yield(&self) -> &YieldTermStructureHandle;

    /// Black volatility term structure.
    fn black_volatility(&self) -> &BlackVolTermStructureHandle;

    /// Simulation time of `date`, measured on the risk-free curve.
    fn time(&self, date: Date) -> f64 {
        self.risk_free_rate().time_from_reference(date)
    }
}

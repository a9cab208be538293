//! Market data consumed by processes and engines.
//!
//! # Components
//!
//! - [`quote`]: Shared scalar observables ([`Quote`], [`SimpleQuote`])
//! - [`curves`]: Yield term structures ([`FlatForward`], [`InterpolatedZeroCurve`])
//! - [`surfaces`]: Black volatility term structures ([`BlackConstantVol`], [`BlackVarianceCurve`])
//! - [`error`]: Market data error types ([`MarketDataError`])
//!
//! Every structure is held through an `Arc<dyn Trait>` handle so that a
//! quote update is visible to all consumers sharing it.
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{FlatForward, YieldTermStructure};
//! use pricer_core::market_data::surfaces::{BlackConstantVol, BlackVolTermStructure};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2026, 1, 2).unwrap();
//! let curve = FlatForward::new(today, 0.05, DayCountConvention::ActualActual365);
//! let df = curve.discount(1.0, false).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! let vol = BlackConstantVol::new(today, 0.20, DayCountConvention::ActualActual365);
//! assert_eq!(vol.black_vol(1.0, 100.0, false).unwrap(), 0.20);
//! ```

pub mod curves;
pub mod error;
pub mod quote;
pub mod surfaces;

pub use curves::{
    FlatForward, InterpolatedZeroCurve, YieldTermStructure, YieldTermStructureHandle,
};
pub use error::MarketDataError;
pub use quote::{Quote, QuoteHandle, SimpleQuote};
pub use surfaces::{
    BlackConstantVol, BlackVarianceCurve, BlackVolTermStructure, BlackVolTermStructureHandle,
};

//! # pricer_core: Market Data Foundation for Monte Carlo Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `DateError`, `InterpolationError` (`types::error`)
//! - Market data: quotes, yield and Black volatility term structures (`market_data`)
//! - Linear interpolation used by the term structures (`math::interpolators`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::{FlatForward, Quote, SimpleQuote, YieldTermStructure};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2026, 1, 2).unwrap();
//! let maturity = Date::from_ymd(2027, 1, 2).unwrap();
//!
//! let spot = Arc::new(SimpleQuote::new(100.0));
//! assert_eq!(spot.value().unwrap(), 100.0);
//!
//! let curve = FlatForward::new(today, 0.05, DayCountConvention::ActualActual365);
//! let df = curve.discount_date(maturity, false).unwrap();
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Date`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;

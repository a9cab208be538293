//! # Pricer Models (L2: Business Logic)
//!
//! Stochastic processes, option instruments and closed-form prices.
//!
//! This crate provides:
//! - Black-Scholes-Merton processes, time-varying and frozen (`processes`)
//! - Payoff, exercise and option definitions (`instruments`)
//! - Black-Scholes-Merton closed form for validation (`analytical`)
//!
//! ## Design Principles
//!
//! - **Closed enums** for payoffs, exercises and engine processes, decided once
//!   at construction and dispatched with `match`
//! - **Shared market handles** from `pricer_core`, so a quote update reaches
//!   every time-varying consumer
//! - **Snapshot semantics** for the constant process: inputs are read once
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::processes::{
//!     ConstantBlackScholesProcess, GeneralizedBlackScholesProcess, StochasticProcess1D,
//! };
//!
//! let today = Date::from_ymd(2026, 1, 2).unwrap();
//! let dc = DayCountConvention::ActualActual365;
//! let process = GeneralizedBlackScholesProcess::new(
//!     Arc::new(SimpleQuote::new(100.0)),
//!     Arc::new(FlatForward::new(today, 0.0, dc)),
//!     Arc::new(FlatForward::new(today, 0.05, dc)),
//!     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
//! );
//! let frozen = ConstantBlackScholesProcess::from_process(&process, today).unwrap();
//! assert!((frozen.variance(0.0, 100.0, 1.0) - 0.04).abs() < 1e-12);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod processes;

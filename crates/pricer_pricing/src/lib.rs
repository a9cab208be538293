//! # Pricer Pricing (L3: Monte Carlo Engines)
//!
//! Monte Carlo pricing of European vanilla and discrete arithmetic
//! average-strike Asian options under a Black-Scholes-Merton process.
//!
//! This crate provides:
//! - Pseudo-random and Halton low-discrepancy Gaussian generators (`rng`)
//! - Time grids, path generation, Brownian bridge, path pricers, sample
//!   statistics and the simulation loop (`mc`)
//! - Engines with immutable builders: [`McEuropeanEngineBuilder`],
//!   [`McDiscreteArithmeticAsEngineBuilder`]
//!
//! ## Design Principles
//!
//! - **Validation at build time**: builder setters never fail; conflicting
//!   options surface from `build()` as a [`ConfigurationError`]
//! - **Compile-time policies**: the random policy and accumulator are type
//!   parameters, so a policy without an error estimate cannot be combined
//!   with a tolerance target
//! - **Reproducibility**: a non-zero seed gives the same price on every
//!   call, sequential or split across a fixed number of rayon workers
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::instruments::{Exercise, OptionType, Payoff, VanillaOption};
//! use pricer_models::processes::GeneralizedBlackScholesProcess;
//! use pricer_pricing::McEuropeanEngineBuilder;
//!
//! let today = Date::from_ymd(2026, 1, 2).unwrap();
//! let dc = DayCountConvention::ActualActual365;
//! let process = GeneralizedBlackScholesProcess::new(
//!     Arc::new(SimpleQuote::new(100.0)),
//!     Arc::new(FlatForward::new(today, 0.0, dc)),
//!     Arc::new(FlatForward::new(today, 0.05, dc)),
//!     Arc::new(BlackConstantVol::new(today, 0.2, dc)),
//! );
//! let option = VanillaOption::new(
//!     Payoff::plain_vanilla(OptionType::Put, 100.0).unwrap(),
//!     Exercise::european(today.add_days(365)),
//! );
//!
//! let mut engine = McEuropeanEngineBuilder::new(process)
//!     .with_steps(1)
//!     .with_absolute_tolerance(0.05)
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//! let result = engine.calculate(&option).unwrap();
//! assert!(result.is_converged());
//! assert!(result.error_estimate.unwrap() <= 0.05);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation of [`mc::McResult`] and
//!   [`mc::ConvergenceStatus`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;

pub use mc::{
    ConfigurationError, McDiscreteArithmeticAsEngineBuilder, McEuropeanEngineBuilder, McResult,
    PricingEngineError,
};

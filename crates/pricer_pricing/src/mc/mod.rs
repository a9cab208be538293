//! Monte Carlo simulation framework and engines.
//!
//! # Architecture
//!
//! ```text
//! McEuropeanEngine / McDiscreteArithmeticAsEngine   (built by immutable builders)
//! └── McSimulation<P, R, S>
//!     ├── TimeGrid            (uniform or through mandatory times)
//!     ├── PathGenerator       (EngineProcess + GaussianSequenceGenerator,
//!     │                        optional BrownianBridge)
//!     ├── PathPricer          (EuropeanPathPricer, ArithmeticAsoPathPricer)
//!     └── Accumulator         (RunningStatistics)
//! ```
//!
//! A *draw* is one path, or one mirrored pair of paths when antithetic
//! variates are on; the two legs of a pair enter the accumulator as two
//! samples. Sample counts and caps in [`McOptions`] are counted in draws,
//! while [`McResult::samples`] reports accumulated samples.
//!
//! # Stopping rules
//!
//! - Fixed samples: exactly `n` draws, optionally split across rayon workers.
//! - Absolute tolerance: draws in batches of at least [`MIN_BATCH`] until the
//!   standard error drops to the target. Reaching the draw cap returns the
//!   estimate flagged [`ConvergenceStatus::NotConverged`].
//!
//! # Examples
//!
//! ```rust
//! use pricer_pricing::mc::{
//!     EuropeanPathPricer, McSimulation, SimulationConfig, TimeGrid,
//! };
//! use pricer_pricing::rng::PseudoRandom;
//! use pricer_core::market_data::{BlackConstantVol, FlatForward, SimpleQuote};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::instruments::OptionType;
//! use pricer_models::processes::{ConstantBlackScholesProcess, GeneralizedBlackScholesProcess};
//! use std::sync::Arc;
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
//!
//! let grid = TimeGrid::uniform(1.0, 1).unwrap();
//! let pricer = EuropeanPathPricer::new(OptionType::Call, 100.0, (-0.05_f64).exp());
//! let mut simulation = McSimulation::<_, PseudoRandom>::new(
//!     frozen.into(),
//!     grid,
//!     pricer,
//!     SimulationConfig::with_samples(20_000, 7),
//! );
//! let result = simulation.run().unwrap();
//! assert!((result.value - 10.45).abs() < 4.0 * result.error_estimate.unwrap());
//! ```

#[macro_use]
mod config;

mod asian;
mod brownian_bridge;
mod error;
mod european;
mod path;
mod path_generator;
mod path_pricer;
mod simulation;
mod statistics;
mod time_grid;

pub use asian::{McDiscreteArithmeticAsEngine, McDiscreteArithmeticAsEngineBuilder};
pub use brownian_bridge::BrownianBridge;
pub use config::{McOptions, SimulationConfig, StoppingRule};
pub use error::{ConfigurationError, PricingEngineError};
pub use european::{McEuropeanEngine, McEuropeanEngineBuilder, TimeSteps};
pub use path::Path;
pub use path_generator::PathGenerator;
pub use path_pricer::{ArithmeticAsoPathPricer, EuropeanPathPricer, PathPricer};
pub use simulation::{
    ConvergenceStatus, McResult, McSimulation, SimulationState, MIN_BATCH,
};
pub use statistics::{Accumulator, RunningStatistics};
pub use time_grid::TimeGrid;

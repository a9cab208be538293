//! Black-Scholes-Merton stochastic processes.
//!
//! - [`StochasticProcess1D`]: capability used by path generation
//! - [`BlackScholesProcess`]: adds access to the market inputs
//! - [`GeneralizedBlackScholesProcess`]: time-varying inputs, read per step
//! - [`ConstantBlackScholesProcess`]: inputs frozen at the evaluation date
//! - [`EngineProcess`]: tagged choice between the two, fixed at build time

mod constant;
mod engine_process;
mod error;
mod generalized;
mod traits;

pub use constant::ConstantBlackScholesProcess;
pub use engine_process::EngineProcess;
pub use error::ProcessError;
pub use generalized::GeneralizedBlackScholesProcess;
pub use traits::{BlackScholesProcess, StochasticProcess1D};

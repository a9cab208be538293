//! Option instruments consumed by the pricing engines.
//!
//! - [`OptionType`], [`Payoff`]: closed set of striked payoffs
//! - [`Exercise`]: European, American and Bermudan schedules
//! - [`VanillaOption`]: payoff plus exercise
//! - [`DiscreteAveragingAsianOption`]: adds fixing dates and past fixings

mod asian;
mod error;
mod exercise;
mod payoff;
mod vanilla;

pub use asian::DiscreteAveragingAsianOption;
pub use error::InstrumentError;
pub use exercise::Exercise;
pub use payoff::{OptionType, Payoff};
pub use vanilla::VanillaOption;

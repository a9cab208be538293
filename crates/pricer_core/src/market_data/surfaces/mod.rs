//! Black volatility term structures.
//!
//! - [`BlackVolTermStructure`]: volatility, total and forward variance
//! - [`BlackConstantVol`]: single volatility, fixed or quoted
//! - [`BlackVarianceCurve`]: term volatilities interpolated in total variance

mod flat;
mod traits;
mod variance_curve;

pub use flat::BlackConstantVol;
pub use traits::{BlackVolTermStructure, BlackVolTermStructureHandle};
pub use variance_curve::BlackVarianceCurve;

//! Yield term structures.
//!
//! - [`YieldTermStructure`]: discount factors, zero and forward rates
//! - [`FlatForward`]: single rate, fixed or quoted
//! - [`InterpolatedZeroCurve`]: linear zero-rate interpolation over pillars

mod flat;
mod interpolated;
mod traits;

pub use flat::FlatForward;
pub use interpolated::InterpolatedZeroCurve;
pub use traits::{YieldTermStructure, YieldTermStructureHandle, INSTANTANEOUS_DT};

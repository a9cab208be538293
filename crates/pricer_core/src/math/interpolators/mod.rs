//! Interpolation methods for term structure construction.
//!
//! ## Core Trait
//!
//! 1D interpolators implement the [`Interpolator`] trait, which defines:
//! - `interpolate(x) -> Result<f64, InterpolationError>`: Compute interpolated value
//! - `domain() -> (f64, f64)`: Return valid interpolation range
//! - `interpolate_flat(x) -> f64`: Flat extrapolation outside the domain
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! // Interpolate at x = 1.5 (between y=1.0 and y=4.0)
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//!
//! // Flat beyond the last knot
//! assert_eq!(interp.interpolate_flat(10.0), 9.0);
//! ```

mod linear;
mod traits;

pub use linear::LinearInterpolator;
pub use traits::Interpolator;

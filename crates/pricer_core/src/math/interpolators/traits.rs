//! Interpolator trait definition.

use crate::types::InterpolationError;

/// One-dimensional interpolation over a fixed set of knots.
///
/// Implementors return `OutOfBounds` for queries outside [`domain`](Self::domain)
/// from [`interpolate`](Self::interpolate); callers that want flat
/// extrapolation use [`interpolate_flat`](Self::interpolate_flat).
pub trait Interpolator {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    /// `InterpolationError::OutOfBounds` if `x` lies outside the knot range.
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (f64, f64);

    /// Interpolated value at `x`, clamping `x` to the domain first.
    fn interpolate_flat(&self, x: f64) -> f64 {
        let (lo, hi) = self.domain();
        let clamped = x.clamp(lo, hi);
        // Clamped queries are inside the domain by construction.
        self.interpolate(clamped).unwrap_or(f64::NAN)
    }
}

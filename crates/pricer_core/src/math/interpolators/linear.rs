//! Linear interpolation implementation.

use super::Interpolator;
use crate::types::InterpolationError;

/// Piecewise linear interpolator.
///
/// Stores sorted (x, y) knots and interpolates linearly between adjacent
/// points. Abscissae must be finite and, once sorted, strictly increasing.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[2.0, 0.0, 1.0], &[4.0, 0.0, 2.0]).unwrap();
/// assert_eq!(interp.xs(), &[0.0, 1.0, 2.0]);
/// assert!((interp.interpolate(0.25).unwrap() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LinearInterpolator {
    /// Construct a linear interpolator from x and y data points.
    ///
    /// Data points are sorted by x-coordinate. At least 2 points are required.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - mismatched lengths or non-finite values
    /// * `InsufficientData` - fewer than 2 data points
    /// * `NonMonotonicData` - duplicate abscissae
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(InterpolationError::InvalidInput(
                "knots must be finite".to_string(),
            ));
        }

        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(index) = pairs.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(InterpolationError::NonMonotonicData { index: index + 1 });
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` with `xs[i] <= x < xs[i+1]`, clamped to [0, n-2].
    #[inline]
    fn find_segment(&self, x: f64) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if !(x_min..=x_max).contains(&x) {
            return Err(InterpolationError::OutOfBounds {
                x,
                min: x_min,
                max: x_max,
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * t)
    }

    #[inline]
    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_single_point() {
        let result = LinearInterpolator::new(&[0.0], &[0.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::InsufficientData { got: 1, need: 2 })
        ));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = LinearInterpolator::new(&[0.0, 1.0], &[0.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_duplicate_abscissa() {
        let result = LinearInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::NonMonotonicData { index: 2 })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let result = LinearInterpolator::new(&[0.0, f64::NAN], &[0.0, 1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_knots_are_reproduced() {
        let interp = LinearInterpolator::new(&[0.0, 1.0, 3.0], &[1.0, 3.0, -1.0]).unwrap();
        assert_relative_eq!(interp.interpolate(0.0).unwrap(), 1.0);
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 3.0);
        assert_relative_eq!(interp.interpolate(3.0).unwrap(), -1.0);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_out_of_bounds() {
        let interp = LinearInterpolator::new(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        let err = interp.interpolate(2.5).unwrap_err();
        assert_eq!(
            err,
            InterpolationError::OutOfBounds {
                x: 2.5,
                min: 1.0,
                max: 2.0
            }
        );
    }

    #[test]
    fn test_flat_extrapolation() {
        let interp = LinearInterpolator::new(&[1.0, 2.0], &[5.0, 7.0]).unwrap();
        assert_relative_eq!(interp.interpolate_flat(0.0), 5.0);
        assert_relative_eq!(interp.interpolate_flat(9.0), 7.0);
    }

    proptest! {
        #[test]
        fn prop_value_between_neighbouring_knots(x in 0.0f64..4.0) {
            let interp = LinearInterpolator::new(
                &[0.0, 1.0, 2.0, 4.0],
                &[0.02, 0.025, 0.03, 0.028],
            ).unwrap();
            let y = interp.interpolate(x).unwrap();
            prop_assert!((0.02 - 1e-12..=0.03 + 1e-12).contains(&y));
        }
    }
}

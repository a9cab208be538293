//! Simulation time grids.
//!
//! A grid always starts at `t = 0` (the process reference time). The Asian
//! engine needs to know whether `t = 0` was also asked for as a fixing, so
//! mandatory times are kept alongside the grid points.

use super::error::PricingEngineError;

/// Increasing sequence of times starting at zero.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::TimeGrid;
///
/// let grid = TimeGrid::uniform(1.0, 4).unwrap();
/// assert_eq!(grid.times(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(grid.steps(), 4);
///
/// let fixings = TimeGrid::from_mandatory_times(&[0.5, 0.0, 1.0, 0.5]).unwrap();
/// assert_eq!(fixings.times(), &[0.0, 0.5, 1.0]);
/// assert!(fixings.starts_with_mandatory_zero());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<f64>,
    mandatory_times: Vec<f64>,
}

impl TimeGrid {
    /// `steps` equal steps from 0 to `end`.
    ///
    /// # Errors
    /// `InvalidPath` when `end` is not positive and finite or `steps` is zero.
    pub fn uniform(end: f64, steps: usize) -> Result<Self, PricingEngineError> {
        if !(end.is_finite() && end > 0.0) {
            return Err(PricingEngineError::invalid_path(format!(
                "grid end time must be positive, got {end}"
            )));
        }
        if steps == 0 {
            return Err(PricingEngineError::invalid_path("grid needs at least one step"));
        }
        let dt = end / steps as f64;
        let mut times: Vec<f64> = (0..steps).map(|i| i as f64 * dt).collect();
        times.push(end);
        Ok(Self {
            times,
            mandatory_times: vec![end],
        })
    }

    /// Grid through the given times, with 0 prepended when missing.
    ///
    /// # Errors
    /// `InvalidPath` for an empty list or negative or non-finite times.
    pub fn from_mandatory_times(times: &[f64]) -> Result<Self, PricingEngineError> {
        if times.is_empty() {
            return Err(PricingEngineError::invalid_path("no mandatory times"));
        }
        if let Some(&t) = times.iter().find(|t| !(t.is_finite() && **t >= 0.0)) {
            return Err(PricingEngineError::invalid_path(format!(
                "mandatory time {t} is negative or not finite"
            )));
        }

        let mut mandatory = times.to_vec();
        mandatory.sort_by(f64::total_cmp);
        mandatory.dedup();

        let mut grid = Vec::with_capacity(mandatory.len() + 1);
        if mandatory[0] > 0.0 {
            grid.push(0.0);
        }
        grid.extend_from_slice(&mandatory);

        Ok(Self {
            times: grid,
            mandatory_times: mandatory,
        })
    }

    /// All grid points, starting with 0.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Times requested by the caller, sorted and deduplicated.
    #[inline]
    pub fn mandatory_times(&self) -> &[f64] {
        &self.mandatory_times
    }

    /// Whether `t = 0` is itself a mandatory time.
    pub fn starts_with_mandatory_zero(&self) -> bool {
        self.mandatory_times.first().is_some_and(|&t| t == 0.0)
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false; a grid holds at least `t = 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of steps (points minus one).
    #[inline]
    pub fn steps(&self) -> usize {
        self.times.len().saturating_sub(1)
    }

    /// Length of step `i`, from point `i` to point `i + 1`.
    #[inline]
    pub fn dt(&self, i: usize) -> f64 {
        self.times[i + 1] - self.times[i]
    }

    /// Final time.
    #[inline]
    pub fn last(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid() {
        let grid = TimeGrid::uniform(2.0, 8).unwrap();
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.last(), 2.0);
        for i in 0..grid.steps() {
            assert_relative_eq!(grid.dt(i), 0.25, epsilon = 1e-15);
        }
        assert!(!grid.starts_with_mandatory_zero());
    }

    #[test]
    fn test_uniform_rejects_bad_input() {
        assert!(TimeGrid::uniform(0.0, 4).is_err());
        assert!(TimeGrid::uniform(-1.0, 4).is_err());
        assert!(TimeGrid::uniform(f64::NAN, 4).is_err());
        assert!(matches!(
            TimeGrid::uniform(1.0, 0),
            Err(PricingEngineError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_mandatory_times_without_zero() {
        let grid = TimeGrid::from_mandatory_times(&[0.75, 0.25]).unwrap();
        assert_eq!(grid.times(), &[0.0, 0.25, 0.75]);
        assert_eq!(grid.mandatory_times(), &[0.25, 0.75]);
        assert!(!grid.starts_with_mandatory_zero());
        assert_eq!(grid.steps(), 2);
    }

    #[test]
    fn test_only_zero_gives_single_point() {
        let grid = TimeGrid::from_mandatory_times(&[0.0]).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.steps(), 0);
        assert!(grid.starts_with_mandatory_zero());
    }

    #[test]
    fn test_mandatory_times_rejects_bad_input() {
        assert!(TimeGrid::from_mandatory_times(&[]).is_err());
        assert!(TimeGrid::from_mandatory_times(&[0.5, -0.1]).is_err());
        assert!(TimeGrid::from_mandatory_times(&[f64::INFINITY]).is_err());
    }
}

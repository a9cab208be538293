//! Sample accumulators for Monte Carlo estimates.
//!
//! [`RunningStatistics`] keeps count, mean and the sum of squared deviations
//! using Welford's update, which stays accurate when the mean is large
//! relative to the spread. Partial accumulators from parallel workers combine
//! with Chan's pairwise formula; merging in a fixed order gives a
//! reproducible result for a fixed seed assignment.

/// Capability needed by the simulation loop to collect payoff samples.
pub trait Accumulator: Default + Clone + Send + Sync {
    /// Add one sample.
    fn add(&mut self, value: f64);

    /// Number of samples added.
    fn samples(&self) -> usize;

    /// Sample mean, `None` before the first sample.
    fn mean(&self) -> Option<f64>;

    /// Standard error of the mean, `None` with fewer than two samples.
    fn error_estimate(&self) -> Option<f64>;

    /// Absorb the samples of `other`.
    fn merge(&mut self, other: &Self);
}

/// Welford running mean and variance.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::{Accumulator, RunningStatistics};
///
/// let mut stats = RunningStatistics::default();
/// assert_eq!(stats.mean(), None);
///
/// for x in [1.0, 2.0, 3.0, 4.0] {
///     stats.add(x);
/// }
/// assert_eq!(stats.mean(), Some(2.5));
/// assert!((stats.variance().unwrap() - 5.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStatistics {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStatistics {
    /// Unbiased sample variance, `None` with fewer than two samples.
    pub fn variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation.
    pub fn standard_deviation(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Smallest sample.
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest sample.
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

impl Accumulator for RunningStatistics {
    #[inline]
    fn add(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    #[inline]
    fn samples(&self) -> usize {
        self.count
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    fn error_estimate(&self) -> Option<f64> {
        self.variance().map(|v| (v / self.count as f64).sqrt())
    }

    fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single_sample() {
        let mut stats = RunningStatistics::default();
        assert_eq!(stats.samples(), 0);
        assert_eq!(stats.error_estimate(), None);
        assert_eq!(stats.min(), None);

        stats.add(3.0);
        assert_eq!(stats.mean(), Some(3.0));
        assert_eq!(stats.error_estimate(), None);
        assert_eq!(stats.min(), Some(3.0));
        assert_eq!(stats.max(), Some(3.0));
    }

    #[test]
    fn test_error_estimate() {
        let mut stats = RunningStatistics::default();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.add(x);
        }
        // Sample variance 32/7 over 8 samples.
        assert_relative_eq!(stats.mean().unwrap(), 5.0);
        assert_relative_eq!(stats.error_estimate().unwrap(), (32.0 / 7.0 / 8.0_f64).sqrt());
        assert_eq!(stats.min(), Some(2.0));
        assert_eq!(stats.max(), Some(9.0));
    }

    #[test]
    fn test_large_offset_is_stable() {
        let mut stats = RunningStatistics::default();
        for x in [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0] {
            stats.add(x);
        }
        assert_relative_eq!(stats.variance().unwrap(), 30.0, epsilon = 1e-6);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut a = RunningStatistics::default();
        let mut b = RunningStatistics::default();
        b.add(1.0);
        b.add(2.0);
        a.merge(&b);
        assert_eq!(a, b);
        a.merge(&RunningStatistics::default());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_merge_matches_sequential(
            xs in prop::collection::vec(-100.0f64..100.0, 1..60),
            split in 0usize..60,
        ) {
            let split = split.min(xs.len());
            let mut whole = RunningStatistics::default();
            xs.iter().for_each(|&x| whole.add(x));

            let mut left = RunningStatistics::default();
            let mut right = RunningStatistics::default();
            xs[..split].iter().for_each(|&x| left.add(x));
            xs[split..].iter().for_each(|&x| right.add(x));
            left.merge(&right);

            prop_assert_eq!(left.samples(), whole.samples());
            prop_assert!((left.mean().unwrap() - whole.mean().unwrap()).abs() < 1e-9);
            if let (Some(a), Some(b)) = (left.variance(), whole.variance()) {
                prop_assert!((a - b).abs() < 1e-7 * (1.0 + b));
            }
        }
    }
}

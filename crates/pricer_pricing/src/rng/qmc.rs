//! Low-discrepancy sequences for quasi-Monte Carlo sampling.
//!
//! [`HaltonSequence`] uses the radical inverse of the point index in the
//! first `dimension` prime bases. A start offset shifts the whole sequence
//! (the "random start" Halton construction), which keeps successive runs with
//! different seeds on different but equally well-spread point sets.
//!
//! Halton points lose uniformity quickly in high dimensions; grids beyond a
//! few dozen steps are better served by the pseudo-random policy.

/// Interface for low-discrepancy sequences over the unit hypercube.
pub trait LowDiscrepancySequence {
    /// Number of coordinates in each point.
    fn dimension(&self) -> usize;

    /// Advances the sequence and returns the next point.
    ///
    /// Every coordinate lies in the open interval (0, 1).
    fn next_point(&mut self) -> &[f64];

    /// Rewinds to the first point.
    fn reset(&mut self);

    /// Skips ahead by `n` points.
    ///
    /// Parallel workers use this to take disjoint blocks of one sequence.
    fn skip(&mut self, n: usize);
}

/// The first `count` primes, by trial division against the primes found so
/// far.
pub fn first_primes(count: usize) -> Vec<u64> {
    let mut primes: Vec<u64> = Vec::with_capacity(count);
    let mut candidate = 2_u64;
    while primes.len() < count {
        let is_prime = primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0);
        if is_prime {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

/// Radical inverse of `index` in `base`: the base-`b` digits of `index`
/// mirrored about the radix point.
#[inline]
pub fn radical_inverse(mut index: u64, base: u64) -> f64 {
    let inv_base = 1.0 / base as f64;
    let mut factor = inv_base;
    let mut result = 0.0;
    while index > 0 {
        result += (index % base) as f64 * factor;
        index /= base;
        factor *= inv_base;
    }
    result
}

/// Halton sequence with an optional start offset.
///
/// Point `k` (counting from one) is the radical inverse of `start + k` in
/// each prime base, so no coordinate is ever exactly zero.
///
/// # Examples
///
/// ```
/// use pricer_pricing::rng::{HaltonSequence, LowDiscrepancySequence};
///
/// let mut halton = HaltonSequence::new(2, 0);
/// assert_eq!(halton.next_point(), &[0.5, 1.0 / 3.0]);
/// assert_eq!(halton.next_point(), &[0.25, 2.0 / 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct HaltonSequence {
    bases: Vec<u64>,
    start: u64,
    index: u64,
    point: Vec<f64>,
}

impl HaltonSequence {
    /// Sequence in `dimension` coordinates, starting after index `start`.
    pub fn new(dimension: usize, start: u64) -> Self {
        Self {
            bases: first_primes(dimension),
            start,
            index: start,
            point: vec![0.0; dimension],
        }
    }

    /// Index of the last point returned.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }
}

impl LowDiscrepancySequence for HaltonSequence {
    fn dimension(&self) -> usize {
        self.bases.len()
    }

    fn next_point(&mut self) -> &[f64] {
        // Index 0 maps to the origin in every base.
        self.index = self.index.wrapping_add(1).max(1);
        for (x, &base) in self.point.iter_mut().zip(&self.bases) {
            *x = radical_inverse(self.index, base);
        }
        &self.point
    }

    fn reset(&mut self) {
        self.index = self.start;
    }

    fn skip(&mut self, n: usize) {
        self.index = self.index.wrapping_add(n as u64);
    }
}

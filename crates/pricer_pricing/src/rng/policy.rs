//! Random-number policies for the Monte Carlo engines.
//!
//! A policy names the Gaussian sequence generator feeding the path generator
//! and states whether the resulting sample mean has a meaningful standard
//! error. Pseudo-random draws are independent, so the standard error is a
//! valid stopping criterion; low-discrepancy points are not, so tolerance
//! mode is rejected for them at build time.

use super::inverse_normal::inverse_normal_cdf;
use super::prng::PricerRng;
use super::qmc::{HaltonSequence, LowDiscrepancySequence};

/// Source of vectors of independent standard normal draws.
pub trait GaussianSequenceGenerator {
    /// Length of each vector.
    fn dimension(&self) -> usize;

    /// Next vector of draws.
    fn next_sequence(&mut self) -> &[f64];
}

/// Compile-time choice of Gaussian generator for an engine.
pub trait RandomPolicy: Send + Sync + 'static {
    /// Generator type built for each run.
    type Generator: GaussianSequenceGenerator;

    /// Whether the standard error of the sample mean may be reported.
    const ALLOWS_ERROR_ESTIMATE: bool;

    /// Policy name for logging and error messages.
    const NAME: &'static str;

    /// Generator for a sequential run. `seed` is already resolved (non-zero).
    fn generator(dimension: usize, seed: u64) -> Self::Generator {
        Self::worker_generator(dimension, seed, 0, 0)
    }

    /// Generator for parallel worker `worker`, whose first draw has global
    /// index `first_draw`. Worker 0 starting at draw 0 reproduces
    /// [`RandomPolicy::generator`].
    fn worker_generator(
        dimension: usize,
        seed: u64,
        worker: usize,
        first_draw: u64,
    ) -> Self::Generator;
}

/// Pseudo-random Gaussian vectors from [`PricerRng`].
#[derive(Debug, Clone)]
pub struct PseudoRandomSequence {
    rng: PricerRng,
    buffer: Vec<f64>,
}

impl PseudoRandomSequence {
    /// Generator of `dimension`-vectors seeded with `seed`.
    pub fn new(dimension: usize, seed: u64) -> Self {
        Self {
            rng: PricerRng::from_seed(seed),
            buffer: vec![0.0; dimension],
        }
    }
}

impl GaussianSequenceGenerator for PseudoRandomSequence {
    fn dimension(&self) -> usize {
        self.buffer.len()
    }

    fn next_sequence(&mut self) -> &[f64] {
        self.rng.fill_normal(&mut self.buffer);
        &self.buffer
    }
}

/// Halton points mapped through the inverse normal cdf.
#[derive(Debug, Clone)]
pub struct HaltonGaussianSequence {
    halton: HaltonSequence,
    buffer: Vec<f64>,
}

impl HaltonGaussianSequence {
    /// Generator of `dimension`-vectors whose first point follows `start`.
    pub fn new(dimension: usize, start: u64) -> Self {
        Self {
            halton: HaltonSequence::new(dimension, start),
            buffer: vec![0.0; dimension],
        }
    }
}

impl GaussianSequenceGenerator for HaltonGaussianSequence {
    fn dimension(&self) -> usize {
        self.buffer.len()
    }

    fn next_sequence(&mut self) -> &[f64] {
        let point = self.halton.next_point();
        for (z, &u) in self.buffer.iter_mut().zip(point) {
            *z = inverse_normal_cdf(u);
        }
        &self.buffer
    }
}

/// Independent pseudo-random draws; worker `i` uses seed `seed + i`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoRandom;

impl RandomPolicy for PseudoRandom {
    type Generator = PseudoRandomSequence;

    const ALLOWS_ERROR_ESTIMATE: bool = true;
    const NAME: &'static str = "pseudo-random";

    fn worker_generator(
        dimension: usize,
        seed: u64,
        worker: usize,
        _first_draw: u64,
    ) -> Self::Generator {
        PseudoRandomSequence::new(dimension, seed.wrapping_add(worker as u64))
    }
}

/// Random-start Halton sequence.
///
/// The seed picks the start offset, so a fixed seed is reproducible. Parallel
/// workers continue the same sequence from their first draw index, so the
/// point set does not depend on the worker count.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowDiscrepancy;

/// Start offsets are kept below 2^32 so radical inverses stay well resolved.
const HALTON_START_MASK: u64 = 0xFFFF_FFFF;

impl RandomPolicy for LowDiscrepancy {
    type Generator = HaltonGaussianSequence;

    const ALLOWS_ERROR_ESTIMATE: bool = false;
    const NAME: &'static str = "low-discrepancy";

    fn worker_generator(
        dimension: usize,
        seed: u64,
        _worker: usize,
        first_draw: u64,
    ) -> Self::Generator {
        let start = (seed & HALTON_START_MASK).wrapping_add(first_draw);
        HaltonGaussianSequence::new(dimension, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_random_reproducible() {
        let mut a = PseudoRandom::generator(5, 42);
        let mut b = PseudoRandom::generator(5, 42);
        assert_eq!(a.dimension(), 5);
        for _ in 0..10 {
            assert_eq!(a.next_sequence().to_vec(), b.next_sequence().to_vec());
        }
    }

    #[test]
    fn test_pseudo_random_workers_use_offset_seeds() {
        let mut w1 = PseudoRandom::worker_generator(3, 42, 1, 500);
        let mut direct = PseudoRandomSequence::new(3, 43);
        assert_eq!(w1.next_sequence().to_vec(), direct.next_sequence().to_vec());
    }

    #[test]
    fn test_halton_workers_continue_one_sequence() {
        let mut sequential = LowDiscrepancy::generator(4, 9);
        for _ in 0..10 {
            sequential.next_sequence();
        }
        let mut worker = LowDiscrepancy::worker_generator(4, 9, 3, 10);
        assert_eq!(
            sequential.next_sequence().to_vec(),
            worker.next_sequence().to_vec()
        );
    }

    #[test]
    fn test_halton_draws_are_finite() {
        let mut g = LowDiscrepancy::generator(6, 1);
        for _ in 0..1_000 {
            assert!(g.next_sequence().iter().all(|z| z.is_finite()));
        }
    }

    #[test]
    fn test_policy_flags() {
        assert!(PseudoRandom::ALLOWS_ERROR_ESTIMATE);
        assert!(!LowDiscrepancy::ALLOWS_ERROR_ESTIMATE);
        assert_ne!(PseudoRandom::NAME, LowDiscrepancy::NAME);
    }
}

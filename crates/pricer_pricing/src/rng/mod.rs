//! Random number generation for Monte Carlo simulation.
//!
//! - [`PricerRng`]: seeded `StdRng` wrapper producing uniform and normal draws
//! - [`HaltonSequence`]: low-discrepancy points behind the
//!   [`LowDiscrepancySequence`] interface
//! - [`inverse_normal_cdf`]: maps uniform points to Gaussian draws
//! - [`RandomPolicy`]: compile-time choice between [`PseudoRandom`] and
//!   [`LowDiscrepancy`] generators, carrying whether an error estimate is
//!   meaningful
//!
//! # Reproducibility
//!
//! Every generator is built from a `u64` seed. Engines rebuild their
//! generator on each pricing call, so the same seed yields the same price.
//! Seed `0` is replaced by an entropy seed via [`resolve_seed`].

mod inverse_normal;
mod policy;
mod prng;
mod qmc;

pub use inverse_normal::inverse_normal_cdf;
pub use policy::{
    GaussianSequenceGenerator, HaltonGaussianSequence, LowDiscrepancy, PseudoRandom,
    PseudoRandomSequence, RandomPolicy,
};
pub use prng::{resolve_seed, PricerRng};
pub use qmc::{first_primes, radical_inverse, HaltonSequence, LowDiscrepancySequence};

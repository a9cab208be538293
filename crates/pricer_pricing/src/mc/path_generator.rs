//! Path generation from a one-dimensional process.

use pricer_models::processes::StochasticProcess1D;

use super::brownian_bridge::BrownianBridge;
use super::path::Path;
use super::time_grid::TimeGrid;
use crate::rng::GaussianSequenceGenerator;

/// Draws paths of a process on a fixed grid.
///
/// Each call to [`next`](Self::next) consumes one Gaussian vector of length
/// `grid.steps()`, optionally reorders it through a [`BrownianBridge`], and
/// evolves the process step by step. [`antithetic`](Self::antithetic) reuses
/// the increments of the last draw with their signs flipped, so a `next` /
/// `antithetic` pair is a mirrored couple.
///
/// The path buffer is reused between draws.
#[derive(Debug)]
pub struct PathGenerator<'a, P, G> {
    process: &'a P,
    generator: G,
    bridge: Option<BrownianBridge>,
    times: Vec<f64>,
    increments: Vec<f64>,
    path: Path,
}

impl<'a, P, G> PathGenerator<'a, P, G>
where
    P: StochasticProcess1D,
    G: GaussianSequenceGenerator,
{
    /// Generator for `process` on `grid`.
    ///
    /// `generator` must produce vectors of length `grid.steps()`.
    pub fn new(process: &'a P, grid: TimeGrid, generator: G, brownian_bridge: bool) -> Self {
        debug_assert_eq!(generator.dimension(), grid.steps());
        let steps = grid.steps();
        let bridge = brownian_bridge.then(|| BrownianBridge::new(&grid));
        Self {
            process,
            generator,
            bridge,
            times: grid.times().to_vec(),
            increments: vec![0.0; steps],
            path: Path::new(grid),
        }
    }

    /// Whether increments go through a Brownian bridge.
    pub fn uses_brownian_bridge(&self) -> bool {
        self.bridge.is_some()
    }

    /// Normalised increments of the last draw.
    pub fn last_increments(&self) -> &[f64] {
        &self.increments
    }

    /// Draw a new path.
    pub fn next(&mut self) -> &Path {
        let draws = self.generator.next_sequence();
        match &self.bridge {
            Some(bridge) => bridge.transform(draws, &mut self.increments),
            None => self.increments.copy_from_slice(draws),
        }
        self.evolve(1.0)
    }

    /// Path driven by the negated increments of the last draw.
    pub fn antithetic(&mut self) -> &Path {
        self.evolve(-1.0)
    }

    fn evolve(&mut self, sign: f64) -> &Path {
        let values = self.path.values_mut();
        values[0] = self.process.x0();
        for (i, &dw) in self.increments.iter().enumerate() {
            let t = self.times[i];
            let dt = self.times[i + 1] - t;
            values[i + 1] = self.process.evolve(t, values[i], dt, sign * dw);
        }
        &self.path
    }
}

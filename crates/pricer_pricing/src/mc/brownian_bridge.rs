//! Brownian-bridge construction of path increments.
//!
//! The first Gaussian draw fixes the Brownian motion at the final grid time;
//! each later draw fills the midpoint of the widest remaining gap, conditioned
//! on its already-built neighbours. For low-discrepancy draws this puts the
//! best-distributed coordinates on the largest-scale features of the path.
//!
//! The output is the sequence of normalised increments
//! `(W(t_i) - W(t_{i-1})) / sqrt(t_i - t_{i-1})`, so it can replace an
//! incremental draw without changing the path generator.

use super::time_grid::TimeGrid;

/// Precomputed bridge construction order and weights for one grid.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::{BrownianBridge, TimeGrid};
///
/// let bridge = BrownianBridge::new(&TimeGrid::uniform(1.0, 4).unwrap());
/// let mut increments = vec![0.0; 4];
/// bridge.transform(&[1.0, 0.0, 0.0, 0.0], &mut increments);
///
/// // Only the terminal draw is non-zero: W(1) = 1 spread linearly.
/// for dz in increments {
///     assert!((dz - 0.5).abs() < 1e-12);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BrownianBridge {
    size: usize,
    times: Vec<f64>,
    sqrt_dt: Vec<f64>,
    bridge_index: Vec<usize>,
    left_index: Vec<usize>,
    right_index: Vec<usize>,
    left_weight: Vec<f64>,
    right_weight: Vec<f64>,
    std_dev: Vec<f64>,
}

impl BrownianBridge {
    /// Bridge over the non-zero points of `grid`.
    pub fn new(grid: &TimeGrid) -> Self {
        let times: Vec<f64> = grid.times().iter().skip(1).copied().collect();
        Self::from_times(times)
    }

    fn from_times(times: Vec<f64>) -> Self {
        let size = times.len();
        let mut bridge = Self {
            size,
            sqrt_dt: vec![0.0; size],
            bridge_index: vec![0; size],
            left_index: vec![0; size],
            right_index: vec![0; size],
            left_weight: vec![0.0; size],
            right_weight: vec![0.0; size],
            std_dev: vec![0.0; size],
            times,
        };
        if size > 0 {
            bridge.initialise();
        }
        bridge
    }

    fn initialise(&mut self) {
        let n = self.size;
        let t = &self.times;

        self.sqrt_dt[0] = t[0].sqrt();
        for i in 1..n {
            self.sqrt_dt[i] = (t[i] - t[i - 1]).sqrt();
        }

        // map[i] != 0 once point i is built.
        let mut map = vec![0_usize; n];
        map[n - 1] = 1;
        self.bridge_index[0] = n - 1;
        self.std_dev[0] = t[n - 1].sqrt();
        self.left_weight[0] = 0.0;
        self.right_weight[0] = 0.0;

        let mut j = 0;
        for i in 1..n {
            while map[j] != 0 {
                j += 1;
            }
            let mut k = j;
            while map[k] == 0 {
                k += 1;
            }
            // Point l lies halfway between the unbuilt run [j, k).
            let l = j + ((k - 1 - j) >> 1);
            map[l] = i;

            self.bridge_index[i] = l;
            self.left_index[i] = j;
            self.right_index[i] = k;
            if j != 0 {
                let span = t[k] - t[j - 1];
                self.left_weight[i] = (t[k] - t[l]) / span;
                self.right_weight[i] = (t[l] - t[j - 1]) / span;
                self.std_dev[i] = ((t[l] - t[j - 1]) * (t[k] - t[l]) / span).sqrt();
            } else {
                self.left_weight[i] = (t[k] - t[l]) / t[k];
                self.right_weight[i] = t[l] / t[k];
                self.std_dev[i] = (t[l] * (t[k] - t[l]) / t[k]).sqrt();
            }

            j = k + 1;
            if j >= n {
                j = 0;
            }
        }
    }

    /// Number of draws consumed (grid steps).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Map standard normal draws to normalised increments.
    ///
    /// Both slices must have [`size`](Self::size) elements.
    pub fn transform(&self, input: &[f64], output: &mut [f64]) {
        let n = self.size;
        debug_assert_eq!(input.len(), n);
        debug_assert_eq!(output.len(), n);
        if n == 0 {
            return;
        }

        // Brownian motion levels first.
        output[n - 1] = self.std_dev[0] * input[0];
        for i in 1..n {
            let j = self.left_index[i];
            let k = self.right_index[i];
            let l = self.bridge_index[i];
            output[l] = if j != 0 {
                self.left_weight[i] * output[j - 1]
                    + self.right_weight[i] * output[k]
                    + self.std_dev[i] * input[i]
            } else {
                self.right_weight[i] * output[k] + self.std_dev[i] * input[i]
            };
        }

        // Then increments on unit time.
        for i in (1..n).rev() {
            output[i] -= output[i - 1];
            output[i] /= self.sqrt_dt[i];
        }
        output[0] /= self.sqrt_dt[0];
    }
}

//! Simulated asset paths.

use std::ops::Index;

use super::time_grid::TimeGrid;

/// Asset values on a time grid.
///
/// `values[i]` is the simulated level at `grid.times()[i]`; `values[0]` is the
/// process initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    grid: TimeGrid,
    values: Vec<f64>,
}

impl Path {
    /// Path on `grid` with every value set to zero.
    pub fn new(grid: TimeGrid) -> Self {
        let values = vec![0.0; grid.len()];
        Self { grid, values }
    }

    /// Path with explicit values, stored as given.
    ///
    /// Simulated paths always cover the grid; hand-built paths may be shorter,
    /// down to empty, which the path pricers reject.
    pub fn with_values(grid: TimeGrid, values: Vec<f64>) -> Self {
        Self { grid, values }
    }

    /// Grid the path lives on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// All values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the path holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Initial value.
    #[inline]
    pub fn front(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Terminal value.
    #[inline]
    pub fn back(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

impl Index<usize> for Path {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_accessors() {
        let grid = TimeGrid::uniform(1.0, 2).unwrap();
        let path = Path::with_values(grid, vec![100.0, 105.0, 110.0]);
        assert_eq!(path.len(), 3);
        assert_eq!(path.front(), Some(100.0));
        assert_eq!(path.back(), Some(110.0));
        assert_eq!(path[1], 105.0);
        assert_eq!(path.grid().last(), 1.0);
    }

    #[test]
    fn test_new_path_covers_grid() {
        let path = Path::new(TimeGrid::uniform(1.0, 3).unwrap());
        assert_eq!(path.values(), &[0.0; 4]);

        let empty = Path::with_values(TimeGrid::uniform(1.0, 3).unwrap(), Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.back(), None);
    }
}

//! Discretised simulation timeline.

use crate::{Result, SimError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered, strictly increasing sequence of simulation instants.
///
/// The grid is validated once at construction and is immutable afterwards.
/// Everything indexed by "step" in the simulation is aligned with it.
///
/// # Example
///
/// ```
/// use sim_types::TimeGrid;
///
/// let grid = TimeGrid::uniform(0.0, 1.0, 101).unwrap();
/// assert_eq!(grid.len(), 101);
/// assert_eq!(grid.midpoint_indices(), (50, 51));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct TimeGrid {
    times: Vec<f64>,
}

impl TimeGrid {
    /// Create a grid from explicit instants.
    ///
    /// Fails if `times` is empty, contains non-finite values, or is not
    /// strictly increasing.
    pub fn new(times: Vec<f64>) -> Result<Self> {
        if times.is_empty() {
            return Err(SimError::invalid_grid("grid must contain at least one instant"));
        }
        if let Some(i) = times.iter().position(|t| !t.is_finite()) {
            return Err(SimError::invalid_grid(format!(
                "instant {i} is not finite ({})",
                times[i]
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SimError::invalid_grid(format!(
                "instants must strictly increase, but t[{}] = {} follows t[{i}] = {}",
                i + 1,
                times[i + 1],
                times[i]
            )));
        }
        Ok(Self { times })
    }

    /// Create `n` evenly spaced instants covering `[start, end]`.
    ///
    /// `end` must not precede `start`, even when `n == 1`.
    pub fn uniform(start: f64, end: f64, n: usize) -> Result<Self> {
        if end < start || end.is_nan() {
            return Err(SimError::invalid_grid(format!(
                "end {end} precedes start {start}"
            )));
        }
        match n {
            0 => Err(SimError::invalid_grid("grid must contain at least one instant")),
            1 => Self::new(vec![start]),
            _ => {
                let span = end - start;
                let last = (n - 1) as f64;
                let times = (0..n)
                    .map(|i| if i == n - 1 { end } else { start + span * (i as f64) / last })
                    .collect();
                Self::new(times)
            }
        }
    }

    /// Number of instants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a validated grid holds at least one instant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The instant at `step`, or `None` past the end.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<f64> {
        self.times.get(step).copied()
    }

    /// The instant at `step`, or an index error.
    pub fn time_at(&self, step: usize) -> Result<f64> {
        self.get(step).ok_or(SimError::GridIndexOutOfRange {
            index: step,
            len: self.len(),
        })
    }

    /// First instant.
    #[must_use]
    pub fn first(&self) -> f64 {
        self.times[0]
    }

    /// Last instant.
    #[must_use]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Whether `t` lies in `[first, last]`.
    #[must_use]
    pub fn contains_time(&self, t: f64) -> bool {
        t >= self.first() && t <= self.last()
    }

    /// All instants in order.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Iterate over instants in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.times.iter().copied()
    }

    /// The pair `(floor(N/2), ceil(N/2))`, with the upper index clamped to the
    /// last step so a single-instant grid yields `(0, 0)`.
    #[must_use]
    pub fn midpoint_indices(&self) -> (usize, usize) {
        let n = self.len();
        let lower = n / 2;
        let upper = n.div_ceil(2).min(n - 1);
        (lower.min(n - 1), upper)
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = SimError;

    fn try_from(times: Vec<f64>) -> Result<Self> {
        Self::new(times)
    }
}

impl From<TimeGrid> for Vec<f64> {
    fn from(grid: TimeGrid) -> Self {
        grid.times
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid_endpoints() {
        let grid = TimeGrid::uniform(0.0, 1.0, 101).unwrap();
        assert_eq!(grid.first(), 0.0);
        assert_eq!(grid.last(), 1.0);
        assert_relative_eq!(grid.get(50).unwrap(), 0.5, epsilon = 1e-12);
        assert!(grid.get(101).is_none());
    }

    #[test]
    fn test_rejects_bad_grids() {
        assert!(TimeGrid::new(vec![]).unwrap_err().is_grid_error());
        assert!(TimeGrid::new(vec![0.0, 0.0]).is_err());
        assert!(TimeGrid::new(vec![0.0, 1.0, 0.5]).is_err());
        assert!(TimeGrid::new(vec![0.0, f64::NAN]).is_err());
        assert!(TimeGrid::uniform(1.0, 0.0, 3).is_err());
        assert!(TimeGrid::uniform(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_single_instant_uniform_checks_end() {
        let err = TimeGrid::uniform(1.0, 0.0, 1).unwrap_err();
        assert!(err.is_grid_error());
        assert!(TimeGrid::uniform(1.0, f64::NAN, 1).is_err());

        let grid = TimeGrid::uniform(1.0, 1.0, 1).unwrap();
        assert_eq!(grid.times(), &[1.0]);
    }

    #[test]
    fn test_time_at_reports_index() {
        let grid = TimeGrid::uniform(0.0, 1.0, 11).unwrap();
        let err = grid.time_at(11).unwrap_err();
        assert_eq!(err, SimError::GridIndexOutOfRange { index: 11, len: 11 });
    }

    #[test]
    fn test_midpoint_indices() {
        assert_eq!(TimeGrid::uniform(0.0, 1.0, 101).unwrap().midpoint_indices(), (50, 51));
        assert_eq!(TimeGrid::uniform(0.0, 1.0, 100).unwrap().midpoint_indices(), (50, 50));
        assert_eq!(TimeGrid::new(vec![0.25]).unwrap().midpoint_indices(), (0, 0));
        assert_eq!(TimeGrid::new(vec![0.0, 1.0]).unwrap().midpoint_indices(), (1, 1));
    }

    #[test]
    fn test_contains_time() {
        let grid = TimeGrid::uniform(0.0, 2.0, 5).unwrap();
        assert!(grid.contains_time(0.0));
        assert!(grid.contains_time(1.3));
        assert!(!grid.contains_time(2.0001));
    }
}

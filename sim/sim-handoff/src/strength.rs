//! Per-step strength tables.
//!
//! A strength table holds one value in `[0, 1]` per grid instant. The two
//! tables of a switch are built together: the rising table samples the
//! transition weight, and the decaying table is `1 - rising` computed from
//! those same samples, so the pair sums to exactly 1 at every step.

use sim_types::TimeGrid;
use tracing::{debug, warn};

use crate::transition::TransitionWindow;
use crate::{HandoffError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name given to the decaying (attached-to-hand) table.
pub const HAND_TABLE: &str = "hand";

/// Name given to the rising (attached-to-world) table.
pub const WORLD_TABLE: &str = "world";

/// Precomputed per-step strength values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrengthTable {
    name: String,
    values: Vec<f64>,
}

impl StrengthTable {
    /// Create a table from explicit values.
    ///
    /// Every value must be finite and inside `[0, 1]`.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(HandoffError::invalid_config(format!(
                "strength table {name} is empty"
            )));
        }
        if let Some(i) = values
            .iter()
            .position(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
        {
            return Err(HandoffError::invalid_config(format!(
                "strength table {name}[{i}] = {} is outside [0, 1]",
                values[i]
            )));
        }
        Ok(Self { name, values })
    }

    /// Table name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a validated table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Strength at `step`. Out-of-range steps are an error, never clamped.
    pub fn get(&self, step: usize) -> Result<f64> {
        self.values
            .get(step)
            .copied()
            .ok_or_else(|| HandoffError::StepIndexOutOfRange {
                table: self.name.clone(),
                step,
                len: self.values.len(),
            })
    }

    /// All values in step order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over values in step order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Fail unless the table has one entry per grid instant.
    pub fn check_aligned(&self, grid: &TimeGrid) -> Result<()> {
        if self.len() == grid.len() {
            Ok(())
        } else {
            Err(HandoffError::TableLengthMismatch {
                table: self.name.clone(),
                expected: grid.len(),
                actual: self.len(),
            })
        }
    }
}

/// The decaying and rising tables of one switch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComplementaryTables {
    /// Attached-to-hand strength: 1 before the window, 0 after.
    pub down: StrengthTable,
    /// Attached-to-world strength: 0 before the window, 1 after.
    pub up: StrengthTable,
}

impl ComplementaryTables {
    /// Sample `window` on `grid` into a complementary pair.
    ///
    /// # Example
    ///
    /// ```
    /// use sim_handoff::{ComplementaryTables, TransitionWindow};
    /// use sim_types::TimeGrid;
    ///
    /// let grid = TimeGrid::uniform(0.0, 1.0, 101).unwrap();
    /// let tables = ComplementaryTables::build(&grid, &TransitionWindow::midpoint(&grid)).unwrap();
    ///
    /// assert_eq!(tables.down.values()[0], 1.0);
    /// assert_eq!(tables.up.values()[100], 1.0);
    /// ```
    pub fn build(grid: &TimeGrid, window: &TransitionWindow) -> Result<Self> {
        window.validate_against(grid, &format!("{HAND_TABLE}/{WORLD_TABLE}"))?;
        if window.is_degenerate() {
            warn!(
                t = window.t_start(),
                "zero-length transition window, handoff is a unit step"
            );
        }

        // Rounding in the quintic can dip by an ulp between adjacent
        // instants; the running maximum keeps the rising table monotone.
        let up: Vec<f64> = grid
            .iter()
            .scan(0.0_f64, |peak, t| {
                *peak = peak.max(window.weight(t));
                Some(*peak)
            })
            .collect();
        let down: Vec<f64> = up.iter().map(|w| 1.0 - w).collect();

        debug!(
            steps = grid.len(),
            t_start = window.t_start(),
            t_end = window.t_end(),
            "built complementary strength tables"
        );

        Ok(Self {
            down: StrengthTable::new(HAND_TABLE, down)?,
            up: StrengthTable::new(WORLD_TABLE, up)?,
        })
    }

    /// Wrap an externally supplied pair, checking alignment and complementarity.
    ///
    /// `tolerance` bounds `|down[i] + up[i] - 1|`.
    pub fn from_tables(
        grid: &TimeGrid,
        down: StrengthTable,
        up: StrengthTable,
        tolerance: f64,
    ) -> Result<Self> {
        down.check_aligned(grid)?;
        up.check_aligned(grid)?;
        if let Some((i, sum)) = down
            .iter()
            .zip(up.iter())
            .map(|(d, u)| d + u)
            .enumerate()
            .find(|(_, sum)| (sum - 1.0).abs() > tolerance)
        {
            return Err(HandoffError::invalid_config(format!(
                "tables {} and {} are not complementary at step {i} (sum {sum})",
                down.name(),
                up.name()
            )));
        }
        Ok(Self { down, up })
    }

    /// Exchange the roles of the two tables.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            down: self.up,
            up: self.down,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn design_tables() -> (TimeGrid, ComplementaryTables) {
        let grid = TimeGrid::uniform(0.0, 1.0, 101).unwrap();
        let tables = ComplementaryTables::build(&grid, &TransitionWindow::midpoint(&grid)).unwrap();
        (grid, tables)
    }

    #[test]
    fn test_design_tables_shape() {
        let (_, tables) = design_tables();
        let down = tables.down.values();

        assert_relative_eq!(down[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(down[100], 0.0, epsilon = 1e-9);
        assert!(down[..=50].iter().all(|&v| v >= 0.5));
        assert!(down[51..].iter().all(|&v| v <= 0.5));
    }

    #[test]
    fn test_tables_sum_to_one_exactly() {
        let grid = TimeGrid::uniform(0.0, 3.0, 301).unwrap();
        let window = TransitionWindow::new(0.37, 2.11).unwrap();
        let tables = ComplementaryTables::build(&grid, &window).unwrap();

        for (d, u) in tables.down.iter().zip(tables.up.iter()) {
            assert_eq!(d + u, 1.0);
        }
    }

    #[test]
    fn test_tables_monotone_on_adjacent_instants() {
        // The two middle instants are neighbouring floats.
        let grid = TimeGrid::new(vec![
            0.0,
            1.082_918_382_479_626_8e-4,
            1.082_918_382_479_627e-4,
            1.0,
        ])
        .unwrap();
        let window = TransitionWindow::new(0.0, 1.0).unwrap();
        let tables = ComplementaryTables::build(&grid, &window).unwrap();

        let up = tables.up.values();
        let down = tables.down.values();
        assert!(up.windows(2).all(|w| w[1] >= w[0]));
        assert!(down.windows(2).all(|w| w[1] <= w[0]));
        assert!(up[1] > 0.0);
        assert_eq!(up[3], 1.0);
        for (d, u) in down.iter().zip(up) {
            assert_eq!(d + u, 1.0);
        }
    }

    #[test]
    fn test_get_out_of_range_names_table() {
        let (_, tables) = design_tables();
        let err = tables.down.get(101).unwrap_err();
        assert_eq!(
            err,
            HandoffError::StepIndexOutOfRange {
                table: HAND_TABLE.into(),
                step: 101,
                len: 101,
            }
        );
        assert_eq!(tables.up.get(100).unwrap(), 1.0);
    }

    #[test]
    fn test_build_rejects_window_outside_grid() {
        let grid = TimeGrid::uniform(0.0, 1.0, 11).unwrap();
        let window = TransitionWindow::new(-0.5, 0.5).unwrap();
        let err = ComplementaryTables::build(&grid, &window).unwrap_err();
        assert!(matches!(err, HandoffError::InvalidTransitionWindow { .. }));
    }

    #[test]
    fn test_new_rejects_out_of_unit_values() {
        assert!(StrengthTable::new("t", vec![0.0, 1.2]).is_err());
        assert!(StrengthTable::new("t", vec![f64::NAN]).is_err());
        assert!(StrengthTable::new("t", vec![]).is_err());
        assert!(StrengthTable::new("t", vec![0.0, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_from_tables_checks_alignment_and_sum() {
        let grid = TimeGrid::uniform(0.0, 1.0, 3).unwrap();
        let down = StrengthTable::new("d", vec![1.0, 0.5, 0.0]).unwrap();
        let up = StrengthTable::new("u", vec![0.0, 0.5, 1.0]).unwrap();
        assert!(ComplementaryTables::from_tables(&grid, down.clone(), up, 1e-12).is_ok());

        let lopsided = StrengthTable::new("u", vec![0.0, 0.4, 1.0]).unwrap();
        assert!(ComplementaryTables::from_tables(&grid, down.clone(), lopsided, 1e-12).is_err());

        let short = StrengthTable::new("u", vec![0.0, 1.0]).unwrap();
        let err = ComplementaryTables::from_tables(&grid, down, short, 1e-12).unwrap_err();
        assert!(matches!(err, HandoffError::TableLengthMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_swapped_exchanges_roles() {
        let (_, tables) = design_tables();
        let swapped = tables.clone().swapped();
        assert_eq!(swapped.down, tables.up);
        assert_eq!(swapped.up, tables.down);
    }
}

//! Step-indexed contact force law.
//!
//! ```text
//! F(step) = baseline_force + table[step] × table_scale
//! ```
//!
//! With `baseline_force = 0` and a large `table_scale` the law delivers an
//! effectively rigid coupling at full strength and nothing at zero strength.
//! All interpolation happened when the table was built; evaluation is a
//! lookup.

use crate::strength::StrengthTable;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Force coefficient at full strength.
pub const DEFAULT_TABLE_SCALE: f64 = 1000.0;

/// Force delivered at zero strength.
pub const DEFAULT_BASELINE_FORCE: f64 = 0.0;

/// Scalar force magnitude as a function of the current step.
///
/// # Example
///
/// ```
/// use sim_handoff::{ContactForceLaw, StrengthTable};
///
/// let table = StrengthTable::new("hand", vec![1.0, 0.5, 0.0]).unwrap();
/// let law = ContactForceLaw::new(table);
///
/// assert_eq!(law.evaluate(0).unwrap(), 1000.0);
/// assert_eq!(law.evaluate(1).unwrap(), 500.0);
/// assert!(law.evaluate(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactForceLaw {
    baseline_force: f64,
    table: StrengthTable,
    table_scale: f64,
}

impl ContactForceLaw {
    /// Create a law with the design baseline (0) and scale (1000).
    #[must_use]
    pub fn new(table: StrengthTable) -> Self {
        Self {
            baseline_force: DEFAULT_BASELINE_FORCE,
            table,
            table_scale: DEFAULT_TABLE_SCALE,
        }
    }

    /// Set the force coefficient at full strength.
    #[must_use]
    pub fn with_table_scale(mut self, table_scale: f64) -> Self {
        self.table_scale = table_scale;
        self
    }

    /// Set the force delivered at zero strength.
    #[must_use]
    pub fn with_baseline_force(mut self, baseline_force: f64) -> Self {
        self.baseline_force = baseline_force;
        self
    }

    /// Force magnitude at `step`.
    pub fn evaluate(&self, step: usize) -> Result<f64> {
        Ok(self.baseline_force + self.table.get(step)? * self.table_scale)
    }

    /// The strength table driving this law.
    #[must_use]
    pub fn table(&self) -> &StrengthTable {
        &self.table
    }

    /// Force coefficient at full strength.
    #[must_use]
    pub fn table_scale(&self) -> f64 {
        self.table_scale
    }

    /// Force delivered at zero strength.
    #[must_use]
    pub fn baseline_force(&self) -> f64 {
        self.baseline_force
    }

    /// Number of steps the law can be evaluated at.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false for a law built on a validated table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::strength::ComplementaryTables;
    use crate::transition::TransitionWindow;
    use crate::HandoffError;
    use approx::assert_relative_eq;
    use sim_types::TimeGrid;

    fn design_laws() -> (ContactForceLaw, ContactForceLaw) {
        let grid = TimeGrid::uniform(0.0, 1.0, 101).unwrap();
        let tables = ComplementaryTables::build(&grid, &TransitionWindow::midpoint(&grid)).unwrap();
        (ContactForceLaw::new(tables.down), ContactForceLaw::new(tables.up))
    }

    #[test]
    fn test_full_and_zero_strength() {
        let (hand, _) = design_laws();
        assert_eq!(hand.evaluate(0).unwrap(), 1000.0);
        assert_relative_eq!(hand.evaluate(100).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_step_is_error() {
        let (hand, _) = design_laws();
        let err = hand.evaluate(101).unwrap_err();
        assert!(err.is_out_of_range());
        assert!(matches!(
            err,
            HandoffError::StepIndexOutOfRange { step: 101, len: 101, .. }
        ));
    }

    #[test]
    fn test_baseline_and_scale() {
        let table = StrengthTable::new("t", vec![0.0, 0.25, 1.0]).unwrap();
        let law = ContactForceLaw::new(table)
            .with_table_scale(200.0)
            .with_baseline_force(5.0);

        assert_eq!(law.evaluate(0).unwrap(), 5.0);
        assert_eq!(law.evaluate(1).unwrap(), 55.0);
        assert_eq!(law.evaluate(2).unwrap(), 205.0);
        assert_eq!(law.len(), 3);
    }

    #[test]
    fn test_complementary_laws_conserve_scale() {
        let (hand, world) = design_laws();
        for step in 0..hand.len() {
            let total = hand.evaluate(step).unwrap() + world.evaluate(step).unwrap();
            assert_eq!(total, DEFAULT_TABLE_SCALE);
        }
    }
}

//! Generalised-force assembly handed back to the host.
//!
//! Each registered element adds its signed force to the coordinate it acts
//! on. The host maps coordinates to its own degrees of freedom and includes
//! the sums in its dynamics solve.

use hashbrown::HashMap;

use crate::measure::RelativePoseMeasure;

/// Per-coordinate sums of element forces for one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralizedForces {
    forces: HashMap<RelativePoseMeasure, f64>,
    contributions: usize,
}

impl GeneralizedForces {
    /// Create an empty assembly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one element's force on `coordinate`.
    pub fn add(&mut self, coordinate: RelativePoseMeasure, force: f64) {
        *self.forces.entry(coordinate).or_insert(0.0) += force;
        self.contributions += 1;
    }

    /// Net force on `coordinate`; zero if nothing acted on it.
    #[must_use]
    pub fn get(&self, coordinate: &RelativePoseMeasure) -> f64 {
        self.forces.get(coordinate).copied().unwrap_or(0.0)
    }

    /// Number of distinct coordinates acted on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forces.len()
    }

    /// Whether nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Number of `add` calls since the last clear.
    #[must_use]
    pub fn contributions(&self) -> usize {
        self.contributions
    }

    /// Iterate over `(coordinate, net force)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&RelativePoseMeasure, f64)> {
        self.forces.iter().map(|(k, v)| (k, *v))
    }

    /// Coordinates and net forces in a stable order.
    #[must_use]
    pub fn sorted(&self) -> Vec<(RelativePoseMeasure, f64)> {
        let mut entries: Vec<_> = self.forces.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(k, _)| (k.frame_a(), k.frame_b(), k.kind(), k.axis()));
        entries
    }

    /// Drop all sums, keeping the allocation for the next step.
    pub fn clear(&mut self) {
        self.forces.clear();
        self.contributions = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::measure::Axis;
    use sim_types::FrameId;

    #[test]
    fn test_add_accumulates_per_coordinate() {
        let x = RelativePoseMeasure::linear(FrameId::new(1), FrameId::new(2), Axis::X);
        let y = RelativePoseMeasure::linear(FrameId::new(1), FrameId::new(2), Axis::Y);

        let mut forces = GeneralizedForces::new();
        forces.add(x, 10.0);
        forces.add(x, -4.0);
        forces.add(y, 1.5);

        assert_eq!(forces.get(&x), 6.0);
        assert_eq!(forces.get(&y), 1.5);
        assert_eq!(forces.len(), 2);
        assert_eq!(forces.contributions(), 3);

        let z = RelativePoseMeasure::linear(FrameId::new(1), FrameId::new(2), Axis::Z);
        assert_eq!(forces.get(&z), 0.0);
    }

    #[test]
    fn test_sorted_and_clear() {
        let mut forces = GeneralizedForces::new();
        let rz = RelativePoseMeasure::rotational(FrameId::new(1), FrameId::new(2), Axis::Z);
        let lx = RelativePoseMeasure::linear(FrameId::new(1), FrameId::new(2), Axis::X);
        forces.add(rz, 1.0);
        forces.add(lx, 2.0);

        let sorted = forces.sorted();
        assert_eq!(sorted[0].0, lx);
        assert_eq!(sorted[1].0, rz);

        forces.clear();
        assert!(forces.is_empty());
        assert_eq!(forces.contributions(), 0);
    }
}

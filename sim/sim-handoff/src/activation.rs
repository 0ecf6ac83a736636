//! Activation seam between force elements and the host's actuator model.
//!
//! The host decides how hard each pull-only element pulls. Two stock
//! sources cover the common cases: [`FullActivation`] applies the bare
//! element contract, and [`RestoringActivation`] switches on whichever
//! element of a pair opposes the current deviation.

use crate::element::ForceElement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-element activation supplied by the host.
pub trait ActivationSource {
    /// Activation of `element` at `step`, given the current value of its
    /// coordinate. Values outside `[0, 1]` are clamped by the caller.
    fn activation(&self, element: &ForceElement, step: usize, coordinate: f64) -> f64;
}

impl<F> ActivationSource for F
where
    F: Fn(&ForceElement, usize, f64) -> f64,
{
    fn activation(&self, element: &ForceElement, step: usize, coordinate: f64) -> f64 {
        self(element, step, coordinate)
    }
}

/// Every element fully active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FullActivation;

impl ActivationSource for FullActivation {
    fn activation(&self, _element: &ForceElement, _step: usize, _coordinate: f64) -> f64 {
        1.0
    }
}

/// Activate the element whose sense opposes the deviation.
///
/// ```text
/// activation = clamp(-sign × coordinate × gain, 0, 1)
/// ```
///
/// A push/pull pair under this source delivers
/// `-F × clamp(coordinate × gain, -1, 1)`: linear near zero deviation and
/// saturating at the law's magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestoringActivation {
    gain: f64,
}

impl Default for RestoringActivation {
    fn default() -> Self {
        Self { gain: 100.0 }
    }
}

impl RestoringActivation {
    /// Create a restoring source with the given gain.
    #[must_use]
    pub fn new(gain: f64) -> Self {
        Self { gain: gain.abs() }
    }

    /// Activation per unit deviation (1/m or 1/rad).
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl ActivationSource for RestoringActivation {
    fn activation(&self, element: &ForceElement, _step: usize, coordinate: f64) -> f64 {
        // A deserialised gain skips `new`, so the sign is dropped here too.
        (-element.direction().sign() * coordinate * self.gain.abs()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::element::Direction;
    use crate::force_law::ContactForceLaw;
    use crate::measure::{Axis, RelativePoseMeasure};
    use crate::strength::StrengthTable;
    use approx::assert_relative_eq;
    use sim_types::FrameId;
    use std::sync::Arc;

    fn elements() -> [ForceElement; 2] {
        let law = Arc::new(ContactForceLaw::new(
            StrengthTable::new("hand", vec![1.0]).unwrap(),
        ));
        let measure = RelativePoseMeasure::rotational(FrameId::new(1), FrameId::new(2), Axis::Z);
        Direction::BOTH.map(|d| ForceElement::new(d.label(), measure, Arc::clone(&law), d))
    }

    fn net(source: &impl ActivationSource, coordinate: f64) -> f64 {
        elements()
            .iter()
            .map(|e| {
                let a = source.activation(e, 0, coordinate);
                e.delivered_force(0, a).unwrap()
            })
            .sum()
    }

    #[test]
    fn test_full_activation_cancels() {
        assert_eq!(net(&FullActivation, 0.3), 0.0);
    }

    #[test]
    fn test_restoring_pair_opposes_deviation() {
        let source = RestoringActivation::new(100.0);
        assert_relative_eq!(net(&source, 0.002), -200.0, epsilon = 1e-9);
        assert_relative_eq!(net(&source, -0.002), 200.0, epsilon = 1e-9);
        assert_eq!(net(&source, 0.0), 0.0);
        // Saturates at the law magnitude.
        assert_relative_eq!(net(&source, 0.5), -1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_gain_still_restores() {
        let source = RestoringActivation::new(-100.0);
        assert_eq!(source.gain(), 100.0);
        assert_relative_eq!(net(&source, 0.002), -200.0, epsilon = 1e-9);
        assert_eq!(RestoringActivation::default().gain(), 100.0);

        let unchecked = RestoringActivation { gain: -100.0 };
        assert_relative_eq!(net(&unchecked, 0.002), -200.0, epsilon = 1e-9);
        assert_relative_eq!(net(&unchecked, -0.002), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_only_one_element_active() {
        let source = RestoringActivation::default();
        let [push, pull] = elements();
        assert_eq!(source.activation(&push, 0, 0.001), 0.0);
        assert!(source.activation(&pull, 0, 0.001) > 0.0);
    }

    #[test]
    fn test_closure_source() {
        let half = |_: &ForceElement, _: usize, _: f64| 0.5;
        let [push, _] = elements();
        assert_eq!(half.activation(&push, 0, 0.0), 0.5);
    }
}

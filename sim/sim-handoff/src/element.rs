//! Unidirectional force elements.
//!
//! Actuators in the host can only pull along a fixed sense. A bidirectional
//! restoring action on one coordinate is therefore built from two elements
//! with opposite [`Direction`] that share the coordinate and the force law.
//!
//! ```text
//! generalized_force = direction × law.evaluate(step)
//! ```
//!
//! is the force the element *can* deliver. What it actually delivers is that
//! capacity scaled by the host's activation in `[0, 1]`.

use std::sync::Arc;

use crate::force_law::ContactForceLaw;
use crate::measure::RelativePoseMeasure;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sense of a unidirectional element along its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Acts along `+coordinate`.
    Push,
    /// Acts along `-coordinate`.
    Pull,
}

impl Direction {
    /// Both senses, push first.
    pub const BOTH: [Self; 2] = [Self::Push, Self::Pull];

    /// `+1.0` for push, `-1.0` for pull.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Push => 1.0,
            Self::Pull => -1.0,
        }
    }

    /// The other sense.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Push => Self::Pull,
            Self::Pull => Self::Push,
        }
    }

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
        }
    }
}

/// Clamp a host activation into `[0, 1]`; `NaN` counts as no activation.
#[must_use]
pub fn clamp_activation(activation: f64) -> f64 {
    if activation.is_nan() {
        0.0
    } else {
        activation.clamp(0.0, 1.0)
    }
}

/// One stateless, unidirectional force actuator on a relative-pose coordinate.
///
/// Elements hold a shared handle to their group's force law; cloning an
/// element never copies the strength table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceElement {
    name: String,
    measure: RelativePoseMeasure,
    law: Arc<ContactForceLaw>,
    direction: Direction,
}

impl ForceElement {
    /// Create an element.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        measure: RelativePoseMeasure,
        law: Arc<ContactForceLaw>,
        direction: Direction,
    ) -> Self {
        Self {
            name: name.into(),
            measure,
            law,
            direction,
        }
    }

    /// Name under which the host registers this actuator.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The coordinate this element acts on.
    #[must_use]
    pub fn measure(&self) -> &RelativePoseMeasure {
        &self.measure
    }

    /// The shared force law.
    #[must_use]
    pub fn law(&self) -> &Arc<ContactForceLaw> {
        &self.law
    }

    /// Sense of action.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Full-activation generalised force at `step`.
    pub fn generalized_force(&self, step: usize) -> Result<f64> {
        Ok(self.direction.sign() * self.law.evaluate(step)?)
    }

    /// Generalised force at `step` under a host activation.
    pub fn delivered_force(&self, step: usize, activation: f64) -> Result<f64> {
        Ok(self.scale(self.law.evaluate(step)?, activation))
    }

    /// Signed force for an already evaluated law magnitude.
    pub(crate) fn scale(&self, magnitude: f64, activation: f64) -> f64 {
        self.direction.sign() * magnitude * clamp_activation(activation)
    }

    /// Same coordinate, opposite sense, new law and name.
    #[must_use]
    pub(crate) fn mirrored(&self, name: String, law: Arc<ContactForceLaw>) -> Self {
        Self {
            name,
            measure: self.measure,
            law,
            direction: self.direction.opposite(),
        }
    }
}

//! Six-DOF contact groups.
//!
//! A group is one virtual rigid joint between two frames: six coordinates,
//! each restrained by a push/pull pair, all twelve elements driven by the
//! same force law. Sharing one law is what makes attach and detach atomic
//! across every degree of freedom at every step.

use std::sync::Arc;

use sim_types::FrameId;
use tracing::debug;

use crate::activation::ActivationSource;
use crate::assembly::GeneralizedForces;
use crate::element::{Direction, ForceElement};
use crate::force_law::ContactForceLaw;
use crate::kinematics::FrameKinematics;
use crate::measure::{RelativeDisplacement, RelativePoseMeasure};
use crate::{HandoffError, Result};

/// Number of elements in a group: 6 coordinates × 2 senses.
pub const ELEMENTS_PER_GROUP: usize = 12;

/// Twelve force elements coupling `frame_b` to `frame_a`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactGroup {
    name: String,
    frame_a: FrameId,
    frame_b: FrameId,
    law: Arc<ContactForceLaw>,
    elements: Vec<ForceElement>,
}

impl ContactGroup {
    /// Wire the twelve elements of a group onto one shared law.
    ///
    /// # Example
    ///
    /// ```
    /// use sim_handoff::{ContactForceLaw, ContactGroup, StrengthTable};
    /// use sim_types::FrameId;
    ///
    /// let law = ContactForceLaw::new(StrengthTable::new("hand", vec![1.0, 0.0]).unwrap());
    /// let group = ContactGroup::new("hand", FrameId::new(1), FrameId::new(2), law).unwrap();
    ///
    /// assert_eq!(group.elements().len(), 12);
    /// assert_eq!(group.elements()[0].name(), "hand_linear_x_push");
    /// ```
    pub fn new(
        name: impl Into<String>,
        frame_a: FrameId,
        frame_b: FrameId,
        law: ContactForceLaw,
    ) -> Result<Self> {
        let name = name.into();
        if frame_a == frame_b {
            return Err(HandoffError::invalid_config(format!(
                "contact group {name} couples {frame_a} to itself"
            )));
        }

        let law = Arc::new(law);
        let elements: Vec<ForceElement> = RelativePoseMeasure::full_set(frame_a, frame_b)
            .into_iter()
            .flat_map(|measure| {
                let name = &name;
                let law = &law;
                Direction::BOTH.into_iter().map(move |direction| {
                    ForceElement::new(
                        element_name(name, &measure, direction),
                        measure,
                        Arc::clone(law),
                        direction,
                    )
                })
            })
            .collect();

        debug!(
            group = %name,
            %frame_a,
            %frame_b,
            elements = elements.len(),
            "wired contact group"
        );

        Ok(Self {
            name,
            frame_a,
            frame_b,
            law,
            elements,
        })
    }

    /// Group name, used as the element name prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference frame.
    #[must_use]
    pub fn frame_a(&self) -> FrameId {
        self.frame_a
    }

    /// Coupled frame.
    #[must_use]
    pub fn frame_b(&self) -> FrameId {
        self.frame_b
    }

    /// The law every element of this group shares.
    #[must_use]
    pub fn law(&self) -> &Arc<ContactForceLaw> {
        &self.law
    }

    /// All twelve elements, push before pull for each coordinate.
    #[must_use]
    pub fn elements(&self) -> &[ForceElement] {
        &self.elements
    }

    /// The six coordinates, one per push/pull pair.
    pub fn measures(&self) -> impl Iterator<Item = &RelativePoseMeasure> {
        self.elements.iter().step_by(2).map(ForceElement::measure)
    }

    /// Law magnitude at `step`, shared by every element.
    pub fn force_magnitude(&self, step: usize) -> Result<f64> {
        self.law.evaluate(step)
    }

    /// Add every element's delivered force at `step` into `out`.
    ///
    /// The law is looked up once and the frame pair resolved once; each
    /// element then projects and scales.
    pub fn evaluate<K, A>(
        &self,
        step: usize,
        kinematics: &K,
        activation: &A,
        out: &mut GeneralizedForces,
    ) -> Result<()>
    where
        K: FrameKinematics + ?Sized,
        A: ActivationSource + ?Sized,
    {
        let magnitude = self.law.evaluate(step)?;
        let displacement = RelativeDisplacement::resolve(kinematics, self.frame_a, self.frame_b)?;

        for element in &self.elements {
            let coordinate = element.measure().project(&displacement);
            let a = activation.activation(element, step, coordinate);
            out.add(*element.measure(), element.scale(magnitude, a));
        }
        Ok(())
    }

    /// Same coordinates with every sense reversed, driven by `law`.
    #[must_use]
    pub fn mirrored(&self, name: impl Into<String>, law: ContactForceLaw) -> Self {
        let name = name.into();
        let law = Arc::new(law);
        let elements = self
            .elements
            .iter()
            .map(|e| {
                let flipped = e.direction().opposite();
                e.mirrored(element_name(&name, e.measure(), flipped), Arc::clone(&law))
            })
            .collect();
        Self {
            name,
            frame_a: self.frame_a,
            frame_b: self.frame_b,
            law,
            elements,
        }
    }
}

fn element_name(group: &str, measure: &RelativePoseMeasure, direction: Direction) -> String {
    format!("{group}_{}_{}", measure.label(), direction.label())
}

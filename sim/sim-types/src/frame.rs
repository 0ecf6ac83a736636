//! Reference frames and their poses.
//!
//! A frame is any body-fixed coordinate system the host engine can place in
//! world space: a hand segment, a held object, or the ground. The contact
//! switch only ever reads frame poses; it never owns bodies.

use nalgebra::{Point3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a reference frame in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameId(pub u64);

impl FrameId {
    /// The ground frame.
    pub const WORLD: Self = Self(0);

    /// Create a new frame ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Whether this is the ground frame.
    #[must_use]
    pub const fn is_world(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for FrameId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_world() {
            write!(f, "World")
        } else {
            write!(f, "Frame({})", self.0)
        }
    }
}

/// Position and orientation of a frame in world coordinates.
///
/// # Example
///
/// ```
/// use sim_types::Pose;
/// use nalgebra::Point3;
///
/// let pose = Pose::from_position(Point3::new(1.0, 2.0, 3.0));
/// let local = pose.inverse_transform_point(&Point3::new(2.0, 2.0, 3.0));
/// assert_eq!(local, Point3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Origin of the frame in world coordinates.
    pub position: Point3<f64>,
    /// Orientation of the frame's basis relative to world.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Create an identity pose (origin, no rotation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position only (identity rotation).
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Create a pose from position and rotation.
    #[must_use]
    pub const fn from_position_rotation(
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self { position, rotation }
    }

    /// Express a world point in this frame's basis, relative to its origin.
    #[must_use]
    pub fn inverse_transform_point(&self, world: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation.inverse() * (world - self.position))
    }

    /// Pose of `other` as seen from this frame: `self⁻¹ · other`.
    #[must_use]
    pub fn relative_to_self(&self, other: &Self) -> Self {
        Self {
            position: self.inverse_transform_point(&other.position),
            rotation: self.rotation.inverse() * other.rotation,
        }
    }

    /// Check if the pose contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|x| x.is_finite())
            && self.rotation.coords.iter().all(|x| x.is_finite())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_frame_id_display() {
        assert_eq!(FrameId::WORLD.to_string(), "World");
        assert_eq!(FrameId::new(4).to_string(), "Frame(4)");
        assert!(FrameId::from(0).is_world());
    }

    #[test]
    fn test_relative_translation_in_rotated_frame() {
        // Frame A rotated 90 degrees about Z; B sits one unit along world +Y.
        let a = Pose::from_position_rotation(
            Point3::origin(),
            UnitQuaternion::from_euler_angles(0.0, 0.0, FRAC_PI_2),
        );
        let b = Pose::from_position(Point3::new(0.0, 1.0, 0.0));

        let rel = a.relative_to_self(&b);
        // World +Y is A's local +X.
        assert_relative_eq!(rel.position.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rel.position.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rel.rotation.angle(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_finiteness() {
        let pose = Pose::from_position(Point3::new(0.1, -0.2, 0.3));
        assert!(pose.is_finite());

        let bad = Pose::from_position(Point3::new(f64::NAN, 0.0, 0.0));
        assert!(!bad.is_finite());
    }
}

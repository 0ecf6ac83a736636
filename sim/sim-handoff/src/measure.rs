//! Relative-pose measures between two frames.
//!
//! A contact group restrains six scalar coordinates of frame B relative to
//! frame A:
//!
//! - **Linear** `x, y, z`: B's origin expressed in A's basis.
//! - **Rotational** `x, y, z`: the rotation vector (axis × angle) of
//!   `R_A⁻¹ R_B`, also expressed in A's basis.
//!
//! Both 3-vectors come from one [`RelativeDisplacement`], so a group reads
//! the host kinematics once per frame pair and projects six times.

use nalgebra::Vector3;
use sim_types::{FrameId, Pose};
use tracing::debug;

use crate::kinematics::FrameKinematics;
use crate::{HandoffError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a measure reads translation or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasureKind {
    /// Translation of B's origin in A (m).
    Linear,
    /// Rotation of B relative to A as a rotation vector (rad).
    Rotational,
}

impl MeasureKind {
    /// Both kinds, linear first.
    pub const ALL: [Self; 2] = [Self::Linear, Self::Rotational];

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Rotational => "rotational",
        }
    }
}

/// Axis of frame A a measure is projected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Local X (index 0).
    X,
    /// Local Y (index 1).
    Y,
    /// Local Z (index 2).
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index, 0 to 2.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Short lowercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

/// Translation and rotation vector of frame B relative to frame A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeDisplacement {
    /// B's origin in A's basis.
    pub linear: Vector3<f64>,
    /// Rotation vector of `R_A⁻¹ R_B` in A's basis.
    pub angular: Vector3<f64>,
}

impl RelativeDisplacement {
    /// Displacement of `b` as seen from `a`.
    #[must_use]
    pub fn between(a: &Pose, b: &Pose) -> Self {
        let relative = a.relative_to_self(b);
        Self {
            linear: relative.position.coords,
            angular: relative.rotation.scaled_axis(),
        }
    }

    /// Resolve both frames through the host and measure.
    pub fn resolve<K>(kinematics: &K, frame_a: FrameId, frame_b: FrameId) -> Result<Self>
    where
        K: FrameKinematics + ?Sized,
    {
        let a = lookup(kinematics, frame_a)?;
        let b = lookup(kinematics, frame_b)?;
        Ok(Self::between(&a, &b))
    }

    /// One scalar component.
    #[must_use]
    pub fn component(&self, kind: MeasureKind, axis: Axis) -> f64 {
        match kind {
            MeasureKind::Linear => self.linear[axis.index()],
            MeasureKind::Rotational => self.angular[axis.index()],
        }
    }
}

fn lookup<K>(kinematics: &K, frame: FrameId) -> Result<Pose>
where
    K: FrameKinematics + ?Sized,
{
    kinematics.frame_pose(frame).ok_or_else(|| {
        debug!(%frame, "host kinematics has no pose for frame");
        HandoffError::FrameNotFound(frame)
    })
}

/// One scalar coordinate of frame B relative to frame A.
///
/// # Example
///
/// ```
/// use sim_handoff::{Axis, PoseSnapshot, RelativePoseMeasure};
/// use sim_types::{FrameId, Pose};
/// use nalgebra::Point3;
///
/// let hand = FrameId::new(1);
/// let bell = FrameId::new(2);
/// let snapshot = PoseSnapshot::new()
///     .with_pose(hand, Pose::from_position(Point3::new(0.0, 0.0, 1.0))).unwrap()
///     .with_pose(bell, Pose::from_position(Point3::new(0.0, 0.0, 1.2))).unwrap();
///
/// let lift = RelativePoseMeasure::linear(hand, bell, Axis::Z);
/// assert!((lift.value(&snapshot).unwrap() - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelativePoseMeasure {
    frame_a: FrameId,
    frame_b: FrameId,
    axis: Axis,
    kind: MeasureKind,
}

impl RelativePoseMeasure {
    /// Create a measure.
    #[must_use]
    pub const fn new(frame_a: FrameId, frame_b: FrameId, axis: Axis, kind: MeasureKind) -> Self {
        Self {
            frame_a,
            frame_b,
            axis,
            kind,
        }
    }

    /// Translational measure along `axis`.
    #[must_use]
    pub const fn linear(frame_a: FrameId, frame_b: FrameId, axis: Axis) -> Self {
        Self::new(frame_a, frame_b, axis, MeasureKind::Linear)
    }

    /// Rotational measure about `axis`.
    #[must_use]
    pub const fn rotational(frame_a: FrameId, frame_b: FrameId, axis: Axis) -> Self {
        Self::new(frame_a, frame_b, axis, MeasureKind::Rotational)
    }

    /// The six measures of a full 6-DOF coupling: linear x, y, z then
    /// rotational x, y, z.
    #[must_use]
    pub fn full_set(frame_a: FrameId, frame_b: FrameId) -> [Self; 6] {
        let mut set = [Self::linear(frame_a, frame_b, Axis::X); 6];
        for (slot, (kind, axis)) in set.iter_mut().zip(
            MeasureKind::ALL
                .into_iter()
                .flat_map(|kind| Axis::ALL.into_iter().map(move |axis| (kind, axis))),
        ) {
            *slot = Self::new(frame_a, frame_b, axis, kind);
        }
        set
    }

    /// Reference frame.
    #[must_use]
    pub const fn frame_a(&self) -> FrameId {
        self.frame_a
    }

    /// Measured frame.
    #[must_use]
    pub const fn frame_b(&self) -> FrameId {
        self.frame_b
    }

    /// Projection axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Translation or rotation.
    #[must_use]
    pub const fn kind(&self) -> MeasureKind {
        self.kind
    }

    /// Label such as `linear_x` or `rotational_z`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}_{}", self.kind.label(), self.axis.label())
    }

    /// Current value, reading the host kinematics.
    pub fn value<K>(&self, kinematics: &K) -> Result<f64>
    where
        K: FrameKinematics + ?Sized,
    {
        RelativeDisplacement::resolve(kinematics, self.frame_a, self.frame_b)
            .map(|d| self.project(&d))
    }

    /// Current value from an already resolved displacement.
    #[must_use]
    pub fn project(&self, displacement: &RelativeDisplacement) -> f64 {
        displacement.component(self.kind, self.axis)
    }
}

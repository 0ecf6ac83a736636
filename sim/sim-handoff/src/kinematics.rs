//! Host kinematics seam.
//!
//! The contact switch never integrates anything. At each step it asks the
//! host for the current world pose of the frames it couples, through
//! [`FrameKinematics`].

use hashbrown::HashMap;
use sim_types::{FrameId, Pose, SimError};

/// Source of instantaneous frame poses, implemented by the host engine.
pub trait FrameKinematics {
    /// World pose of `frame` in the current configuration, if known.
    fn frame_pose(&self, frame: FrameId) -> Option<Pose>;
}

impl<K: FrameKinematics + ?Sized> FrameKinematics for &K {
    fn frame_pose(&self, frame: FrameId) -> Option<Pose> {
        (**self).frame_pose(frame)
    }
}

/// A fixed set of frame poses for one configuration.
///
/// The world frame resolves to the identity pose unless overridden.
///
/// # Example
///
/// ```
/// use sim_handoff::{FrameKinematics, PoseSnapshot};
/// use sim_types::{FrameId, Pose};
/// use nalgebra::Point3;
///
/// let hand = FrameId::new(1);
/// let snapshot = PoseSnapshot::new()
///     .with_pose(hand, Pose::from_position(Point3::new(0.3, 0.0, 1.1)))
///     .unwrap();
///
/// assert!(snapshot.frame_pose(hand).is_some());
/// assert_eq!(snapshot.frame_pose(FrameId::WORLD), Some(Pose::identity()));
/// assert!(snapshot.frame_pose(FrameId::new(7)).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseSnapshot {
    poses: HashMap<FrameId, Pose>,
}

impl PoseSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame pose, rejecting non-finite poses.
    pub fn with_pose(mut self, frame: FrameId, pose: Pose) -> Result<Self, SimError> {
        self.set_pose(frame, pose)?;
        Ok(self)
    }

    /// Insert or replace a frame pose, rejecting non-finite poses.
    pub fn set_pose(&mut self, frame: FrameId, pose: Pose) -> Result<(), SimError> {
        if !pose.is_finite() {
            return Err(SimError::NonFinitePose {
                frame: frame.to_string(),
            });
        }
        self.poses.insert(frame, pose);
        Ok(())
    }

    /// Number of explicitly stored frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Whether no frame has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

impl FrameKinematics for PoseSnapshot {
    fn frame_pose(&self, frame: FrameId) -> Option<Pose> {
        match self.poses.get(&frame) {
            Some(pose) => Some(*pose),
            None if frame.is_world() => Some(Pose::identity()),
            None => None,
        }
    }
}

//! Core value types shared between the contact switch and its host engine.
//!
//! - [`FrameId`] - Identifier of a body-fixed reference frame
//! - [`Pose`] - Position and orientation of a frame in world coordinates
//! - [`TimeGrid`] - The discretised timeline a study steps through
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They carry validation but no physics. The
//! host multibody engine produces poses and owns the timeline; behaviour
//! crates such as `sim-handoff` only read them.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: forward
//! - Z: up
//! - Right-handed
//!
//! # Example
//!
//! ```
//! use sim_types::{FrameId, Pose, TimeGrid};
//! use nalgebra::Point3;
//!
//! let grid = TimeGrid::uniform(0.0, 2.0, 201).unwrap();
//! let hand = FrameId::new(1);
//! let pose = Pose::from_position(Point3::new(0.0, 0.0, 1.0));
//!
//! assert_eq!(grid.len(), 201);
//! assert!(!hand.is_world());
//! assert!(pose.is_finite());
//! ```

#![doc(html_root_url = "https://docs.rs/sim-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::cast_precision_loss,       // usize to f64 is fine for grid indices
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod error;
mod frame;
mod time;

pub use error::SimError;
pub use frame::{FrameId, Pose};
pub use time::TimeGrid;

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Result type for value-type operations.
pub type Result<T> = std::result::Result<T, SimError>;

//! Time-varying contact switch for inverse-dynamics studies.
//!
//! This crate lets a held object (a dumbbell, say) be rigidly coupled to a
//! hand for the first part of a motion and to the world for the rest, with no
//! contact event, no mode switch, and no solver re-initialisation. The
//! coupling is made of steady-state force elements whose strength is read
//! from precomputed per-step tables.
//!
//! # Building Blocks
//!
//! - [`TransitionWindow`]: quintic smoothstep weight `w(t)` across
//!   `[t_start, t_end]`, a unit step when the window has zero length
//! - [`ComplementaryTables`]: `w` sampled on the [`TimeGrid`](sim_types::TimeGrid)
//!   (rising table) and `1 - w` (decaying table)
//! - [`ContactForceLaw`]: `baseline + table[step] × scale`
//! - [`RelativePoseMeasure`]: one of six coordinates of frame B relative to A
//! - [`ForceElement`]: a pull-only actuator on one coordinate, push or pull
//! - [`ContactGroup`]: twelve elements on one shared law, a virtual rigid joint
//! - [`ContactSwitch`]: a hand group and a world group on complementary tables
//!
//! # Host Interface
//!
//! The host multibody engine supplies frame poses through
//! [`FrameKinematics`] and, optionally, per-element activations through
//! [`ActivationSource`]. It receives the 24 elements via
//! [`ContactSwitch::actuators`] and per-coordinate force sums via
//! [`ContactSwitch::assemble`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sim_handoff::{
//!     ContactSwitch, GeneralizedForces, HandoffConfig, PoseSnapshot, RestoringActivation,
//! };
//! use sim_types::{Pose, TimeGrid};
//! use nalgebra::Point3;
//!
//! let grid = Arc::new(TimeGrid::uniform(0.0, 2.0, 201).unwrap());
//! let config = HandoffConfig::dumbbell_release().window(0.9, 1.1);
//! let switch = ContactSwitch::build(Arc::clone(&grid), &config).unwrap();
//!
//! let poses = PoseSnapshot::new()
//!     .with_pose(config.hand, Pose::from_position(Point3::new(0.3, 0.0, 1.0))).unwrap()
//!     .with_pose(config.object, Pose::from_position(Point3::new(0.3, 0.0, 1.0))).unwrap();
//!
//! let mut forces = GeneralizedForces::new();
//! for step in 0..grid.len() {
//!     forces.clear();
//!     switch.assemble(step, &poses, &RestoringActivation::default(), &mut forces).unwrap();
//!     assert_eq!(forces.contributions(), 24);
//! }
//! ```
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Everything is
//! built before the first step and is read-only afterwards.

#![doc(html_root_url = "https://docs.rs/sim-handoff/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::suboptimal_flops
)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod activation;
pub mod assembly;
pub mod config;
pub mod element;
pub mod error;
pub mod force_law;
pub mod group;
pub mod kinematics;
pub mod measure;
pub mod strength;
pub mod switch;
pub mod transition;

pub use activation::{ActivationSource, FullActivation, RestoringActivation};
pub use assembly::GeneralizedForces;
pub use config::{HandoffConfig, WindowPlacement};
pub use element::{Direction, ForceElement, clamp_activation};
pub use error::HandoffError;
pub use force_law::{ContactForceLaw, DEFAULT_BASELINE_FORCE, DEFAULT_TABLE_SCALE};
pub use group::{ContactGroup, ELEMENTS_PER_GROUP};
pub use kinematics::{FrameKinematics, PoseSnapshot};
pub use measure::{Axis, MeasureKind, RelativeDisplacement, RelativePoseMeasure};
pub use strength::{ComplementaryTables, HAND_TABLE, StrengthTable, WORLD_TABLE};
pub use switch::{ContactSwitch, CouplingSample, Regime};
pub use transition::{TransitionWindow, smoothstep, smoothstep_derivative};

/// Result type for contact switch operations.
pub type Result<T> = std::result::Result<T, HandoffError>;

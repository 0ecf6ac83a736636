//! The contact switch: two complementary contact groups.
//!
//! ```text
//!  strength
//!    1 ┤━━━━━━━━━━━━━╮            ╭━━━━━━━━━━━━━  world group
//!      │              ╲          ╱
//!      │               ╲        ╱
//!      │                ╳──────╳
//!      │               ╱        ╲
//!    0 ┤━━━━━━━━━━━━━━╯          ╰━━━━━━━━━━━━━  hand group
//!      └──────────────┬──────────┬──────────────▶ t
//!                  t_start     t_end
//! ```
//!
//! There is no attached/detached state. Both groups are always evaluated, and
//! their strengths sum to 1 at every step, so one of them dominates
//! everywhere outside the window and the crossover inside it is smooth.
//! [`ContactSwitch::dominant_regime`] reports which one dominates; nothing in
//! the force path reads it.

use std::sync::Arc;

use sim_types::TimeGrid;
use tracing::info;

use crate::activation::ActivationSource;
use crate::assembly::GeneralizedForces;
use crate::config::HandoffConfig;
use crate::element::ForceElement;
use crate::force_law::ContactForceLaw;
use crate::group::ContactGroup;
use crate::kinematics::FrameKinematics;
use crate::strength::{ComplementaryTables, HAND_TABLE, WORLD_TABLE};
use crate::transition::TransitionWindow;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which coupling currently carries most of the strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Regime {
    /// The object is held by the hand.
    AttachedToHand,
    /// The object is held by the world.
    AttachedToWorld,
}

/// Law outputs of both groups at one step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CouplingSample {
    /// Grid step.
    pub step: usize,
    /// Grid instant.
    pub time: f64,
    /// Hand group law magnitude.
    pub hand_force: f64,
    /// World group law magnitude.
    pub world_force: f64,
}

impl CouplingSample {
    /// Combined coupling magnitude.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.hand_force + self.world_force
    }
}

/// A switchable rigid coupling emulated by two complementary contact groups.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sim_handoff::{ContactSwitch, HandoffConfig, Regime};
/// use sim_types::TimeGrid;
///
/// let grid = Arc::new(TimeGrid::uniform(0.0, 1.0, 101).unwrap());
/// let switch = ContactSwitch::build(grid, &HandoffConfig::dumbbell_release()).unwrap();
///
/// assert_eq!(switch.actuators().count(), 24);
/// assert_eq!(switch.dominant_regime(0).unwrap(), Regime::AttachedToHand);
/// assert_eq!(switch.dominant_regime(100).unwrap(), Regime::AttachedToWorld);
/// assert_eq!(switch.coupling_at(0).unwrap().total(), 1000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSwitch {
    grid: Arc<TimeGrid>,
    window: TransitionWindow,
    hand: ContactGroup,
    world: ContactGroup,
}

impl ContactSwitch {
    /// Build both groups on `grid` from `config`.
    pub fn build(grid: Arc<TimeGrid>, config: &HandoffConfig) -> Result<Self> {
        config.validate()?;
        let window = config.resolve_window(&grid)?;
        let tables = ComplementaryTables::build(&grid, &window)?;

        let law = |table| {
            ContactForceLaw::new(table)
                .with_table_scale(config.table_scale)
                .with_baseline_force(config.baseline_force)
        };
        let hand = ContactGroup::new(HAND_TABLE, config.hand, config.object, law(tables.down))?;
        let world = ContactGroup::new(WORLD_TABLE, config.world, config.object, law(tables.up))?;

        info!(
            steps = grid.len(),
            t_start = window.t_start(),
            t_end = window.t_end(),
            table_scale = config.table_scale,
            baseline_force = config.baseline_force,
            "built contact switch"
        );

        Ok(Self {
            grid,
            window,
            hand,
            world,
        })
    }

    /// The study's time grid.
    #[must_use]
    pub fn grid(&self) -> &Arc<TimeGrid> {
        &self.grid
    }

    /// The resolved transition window.
    #[must_use]
    pub fn window(&self) -> &TransitionWindow {
        &self.window
    }

    /// Group coupling the object to the hand (decaying strength).
    #[must_use]
    pub fn hand_group(&self) -> &ContactGroup {
        &self.hand
    }

    /// Group coupling the object to the world (rising strength).
    #[must_use]
    pub fn world_group(&self) -> &ContactGroup {
        &self.world
    }

    /// Both groups, hand first.
    #[must_use]
    pub fn groups(&self) -> [&ContactGroup; 2] {
        [&self.hand, &self.world]
    }

    /// All 24 force elements, for registration with the host.
    pub fn actuators(&self) -> impl Iterator<Item = &ForceElement> {
        self.groups()
            .into_iter()
            .flat_map(|group| group.elements().iter())
    }

    /// Law magnitudes of both groups at `step`.
    pub fn coupling_at(&self, step: usize) -> Result<CouplingSample> {
        let hand_force = self.hand.force_magnitude(step)?;
        let world_force = self.world.force_magnitude(step)?;
        Ok(CouplingSample {
            step,
            time: self.grid.time_at(step)?,
            hand_force,
            world_force,
        })
    }

    /// Which group dominates at `step`. Ties go to the hand.
    ///
    /// Reporting only: force evaluation never branches on this.
    pub fn dominant_regime(&self, step: usize) -> Result<Regime> {
        let hand = self.hand.law().table().get(step)?;
        let world = self.world.law().table().get(step)?;
        Ok(if world > hand {
            Regime::AttachedToWorld
        } else {
            Regime::AttachedToHand
        })
    }

    /// Add all 24 elements' delivered forces at `step` into `out`.
    pub fn assemble<K, A>(
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
        self.hand.evaluate(step, kinematics, activation, out)?;
        self.world.evaluate(step, kinematics, activation, out)
    }

    /// Law magnitudes of both groups at every step of the grid.
    pub fn sweep(&self) -> Result<Vec<CouplingSample>> {
        (0..self.grid.len()).map(|step| self.coupling_at(step)).collect()
    }

    /// The switch with the groups' tables exchanged and every element's
    /// sense reversed.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let hand_law = (**self.world.law()).clone();
        let world_law = (**self.hand.law()).clone();
        Self {
            grid: Arc::clone(&self.grid),
            window: self.window,
            hand: self.hand.mirrored(HAND_TABLE, hand_law),
            world: self.world.mirrored(WORLD_TABLE, world_law),
        }
    }
}

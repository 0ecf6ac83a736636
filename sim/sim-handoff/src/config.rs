//! Configuration for a contact switch.
//!
//! The defaults are the design values for a dumbbell released by the hand at
//! the middle of the study: midpoint window, scale 1000, zero baseline.

use sim_types::{FrameId, TimeGrid};

use crate::force_law::{DEFAULT_BASELINE_FORCE, DEFAULT_TABLE_SCALE};
use crate::transition::TransitionWindow;
use crate::{HandoffError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the transition window sits on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WindowPlacement {
    /// Between the grid's two middle instants.
    #[default]
    Midpoint,
    /// Explicit bounds, which must lie inside the grid.
    Explicit {
        /// Start of the handoff.
        t_start: f64,
        /// End of the handoff.
        t_end: f64,
    },
}

/// Parameters of a contact switch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HandoffConfig {
    /// Transition window placement.
    pub window: WindowPlacement,
    /// Force coefficient at full strength.
    pub table_scale: f64,
    /// Force at zero strength.
    pub baseline_force: f64,
    /// Frame holding the object before the handoff.
    pub hand: FrameId,
    /// The held object.
    pub object: FrameId,
    /// Frame holding the object after the handoff.
    pub world: FrameId,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self::dumbbell_release()
    }
}

impl HandoffConfig {
    /// Design values: hand frame 1, dumbbell frame 2, ground, midpoint
    /// window, scale 1000, zero baseline.
    #[must_use]
    pub fn dumbbell_release() -> Self {
        Self {
            window: WindowPlacement::Midpoint,
            table_scale: DEFAULT_TABLE_SCALE,
            baseline_force: DEFAULT_BASELINE_FORCE,
            hand: FrameId::new(1),
            object: FrameId::new(2),
            world: FrameId::WORLD,
        }
    }

    /// Set the frames of the hand, the object, and the world.
    #[must_use]
    pub fn frames(mut self, hand: FrameId, object: FrameId, world: FrameId) -> Self {
        self.hand = hand;
        self.object = object;
        self.world = world;
        self
    }

    /// Place the window explicitly.
    #[must_use]
    pub fn window(mut self, t_start: f64, t_end: f64) -> Self {
        self.window = WindowPlacement::Explicit { t_start, t_end };
        self
    }

    /// Set the force coefficient at full strength.
    #[must_use]
    pub fn table_scale(mut self, table_scale: f64) -> Self {
        self.table_scale = table_scale;
        self
    }

    /// Set the force at zero strength.
    #[must_use]
    pub fn baseline_force(mut self, baseline_force: f64) -> Self {
        self.baseline_force = baseline_force;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.table_scale.is_finite() || self.table_scale <= 0.0 {
            return Err(HandoffError::invalid_config(format!(
                "table_scale must be positive and finite, got {}",
                self.table_scale
            )));
        }
        // A negative baseline would reverse the sense of a pull-only element.
        if !self.baseline_force.is_finite() || self.baseline_force < 0.0 {
            return Err(HandoffError::invalid_config(format!(
                "baseline_force must be non-negative and finite, got {}",
                self.baseline_force
            )));
        }
        if self.hand == self.object || self.world == self.object || self.hand == self.world {
            return Err(HandoffError::invalid_config(format!(
                "hand ({}), object ({}) and world ({}) frames must be distinct",
                self.hand, self.object, self.world
            )));
        }
        if let WindowPlacement::Explicit { t_start, t_end } = self.window {
            TransitionWindow::new(t_start, t_end)?;
        }
        Ok(())
    }

    /// Resolve the window on `grid`, checking it lies inside the grid.
    pub fn resolve_window(&self, grid: &TimeGrid) -> Result<TransitionWindow> {
        let window = match self.window {
            WindowPlacement::Midpoint => TransitionWindow::midpoint(grid),
            WindowPlacement::Explicit { t_start, t_end } => TransitionWindow::new(t_start, t_end)?,
        };
        window.validate_against(grid, "contact switch")?;
        Ok(window)
    }
}

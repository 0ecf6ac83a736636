//! Error types for building and evaluating a contact switch.
//!
//! Every error here is a configuration or wiring fault: the switch is built
//! once before stepping, so there is nothing transient to retry.

use sim_types::{FrameId, SimError};
use thiserror::Error;

/// Errors that can occur while building or evaluating a contact switch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandoffError {
    /// The transition window is inverted, non-finite, or leaves the grid.
    #[error("invalid transition window for {table} [{t_start}, {t_end}]: {reason}")]
    InvalidTransitionWindow {
        /// Name of the table or switch the window belongs to.
        table: String,
        /// Requested start of the window.
        t_start: f64,
        /// Requested end of the window.
        t_end: f64,
        /// Description of what's wrong.
        reason: String,
    },

    /// A force law was evaluated outside its table.
    #[error("step {step} out of range for strength table {table} ({len} steps)")]
    StepIndexOutOfRange {
        /// Name of the table that was indexed.
        table: String,
        /// The requested step.
        step: usize,
        /// Number of entries in the table.
        len: usize,
    },

    /// A strength table does not line up with the time grid.
    #[error("strength table {table} has {actual} entries but the grid has {expected}")]
    TableLengthMismatch {
        /// Name of the offending table.
        table: String,
        /// Grid length.
        expected: usize,
        /// Table length.
        actual: usize,
    },

    /// The host could not resolve a frame referenced by a measure.
    #[error("frame not found in host kinematics: {0}")]
    FrameNotFound(FrameId),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Error from a shared value type.
    #[error(transparent)]
    Sim(#[from] SimError),
}

impl HandoffError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid window error.
    #[must_use]
    pub fn invalid_window(
        table: impl Into<String>,
        t_start: f64,
        t_end: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTransitionWindow {
            table: table.into(),
            t_start,
            t_end,
            reason: reason.into(),
        }
    }

    /// Check if this error can only arise while building the switch.
    #[must_use]
    pub fn is_build_error(&self) -> bool {
        match self {
            Self::InvalidTransitionWindow { .. }
            | Self::TableLengthMismatch { .. }
            | Self::InvalidConfig { .. } => true,
            Self::Sim(err) => err.is_grid_error(),
            Self::StepIndexOutOfRange { .. } | Self::FrameNotFound(_) => false,
        }
    }

    /// Check if this is a step index error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::StepIndexOutOfRange { .. })
    }
}

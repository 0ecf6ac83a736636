//! Smooth transition weight over a time window.
//!
//! The weight rises from 0 to 1 across `[t_start, t_end]` following the
//! quintic smoothstep
//!
//! ```text
//! u    = (t - t_start) / (t_end - t_start)
//! S(u) = 6u⁵ - 15u⁴ + 10u³
//! ```
//!
//! `S` has zero first and second derivatives at both ends, so a force scaled
//! by it never shows a jump in magnitude, rate, or rate of rate at the window
//! edges. A zero-length window is a unit step at `t_start`.

use sim_types::TimeGrid;

use crate::{HandoffError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quintic smoothstep (C2-continuous Hermite) on `[0, 1]`, clamped outside.
#[must_use]
pub fn smoothstep(u: f64) -> f64 {
    if u <= 0.0 {
        return 0.0;
    }
    if u >= 1.0 {
        return 1.0;
    }
    // Rounding near u = 1 can land a hair above 1.
    (u * u * u * (6.0 * u * u - 15.0 * u + 10.0)).min(1.0)
}

/// Derivative of [`smoothstep`] with respect to `u`; zero outside `(0, 1)`.
#[must_use]
pub fn smoothstep_derivative(u: f64) -> f64 {
    if u <= 0.0 || u >= 1.0 {
        return 0.0;
    }
    30.0 * u * u * (u * u - 2.0 * u + 1.0)
}

/// The `[t_start, t_end]` window over which a contact hands off.
///
/// # Example
///
/// ```
/// use sim_handoff::TransitionWindow;
///
/// let window = TransitionWindow::new(1.0, 3.0).unwrap();
/// assert_eq!(window.weight(1.0), 0.0);
/// assert_eq!(window.weight(2.0), 0.5);
/// assert_eq!(window.weight(3.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransitionWindow {
    t_start: f64,
    t_end: f64,
}

impl TransitionWindow {
    /// Create a window, rejecting non-finite or inverted bounds.
    pub fn new(t_start: f64, t_end: f64) -> Result<Self> {
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(HandoffError::invalid_window(
                "transition",
                t_start,
                t_end,
                "bounds must be finite",
            ));
        }
        if t_start > t_end {
            return Err(HandoffError::invalid_window(
                "transition",
                t_start,
                t_end,
                "t_start is after t_end",
            ));
        }
        Ok(Self { t_start, t_end })
    }

    /// The window between the grid's two middle instants,
    /// `t[floor(N/2)]` and `t[ceil(N/2)]`.
    #[must_use]
    pub fn midpoint(grid: &TimeGrid) -> Self {
        let (lower, upper) = grid.midpoint_indices();
        let times = grid.times();
        Self {
            t_start: times[lower],
            t_end: times[upper],
        }
    }

    /// Check that both bounds lie inside the grid's range.
    ///
    /// `label` names the table or switch in the error.
    pub fn validate_against(&self, grid: &TimeGrid, label: &str) -> Result<()> {
        for (name, t) in [("t_start", self.t_start), ("t_end", self.t_end)] {
            if !grid.contains_time(t) {
                return Err(HandoffError::invalid_window(
                    label,
                    self.t_start,
                    self.t_end,
                    format!(
                        "{name} = {t} lies outside the grid range [{}, {}]",
                        grid.first(),
                        grid.last()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Start of the window.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// End of the window.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Length of the window.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.t_end - self.t_start
    }

    /// Whether the window has zero length (unit-step handoff).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_degenerate(&self) -> bool {
        self.t_start == self.t_end
    }

    /// Transition weight `w(t)` in `[0, 1]`.
    ///
    /// The `t >= t_end` test comes first so a degenerate window maps its own
    /// instant to 1.
    #[must_use]
    pub fn weight(&self, t: f64) -> f64 {
        if t >= self.t_end {
            return 1.0;
        }
        if t <= self.t_start {
            return 0.0;
        }
        smoothstep(self.progress(t))
    }

    /// Rate `dw/dt`. Zero outside the window and for a degenerate window.
    #[must_use]
    pub fn rate(&self, t: f64) -> f64 {
        if self.is_degenerate() || t >= self.t_end || t <= self.t_start {
            return 0.0;
        }
        0.5 * smoothstep_derivative(self.progress(t)) / self.half_duration()
    }

    /// Normalised position `u` of `t` in the window.
    ///
    /// Works on halved operands so windows wider than `f64::MAX` stay finite.
    fn progress(&self, t: f64) -> f64 {
        (0.5 * t - 0.5 * self.t_start) / self.half_duration()
    }

    fn half_duration(&self) -> f64 {
        0.5 * self.t_end - 0.5 * self.t_start
    }
}

//! Error types for shared value types.

use thiserror::Error;

/// Errors raised while constructing or querying shared value types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// The time grid is empty, non-finite, or not strictly increasing.
    #[error("invalid time grid: {reason}")]
    InvalidTimeGrid {
        /// Description of what's wrong.
        reason: String,
    },

    /// A grid index was outside `[0, len - 1]`.
    #[error("grid index {index} out of range for {len} instants")]
    GridIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of instants in the grid.
        len: usize,
    },

    /// A pose carried `NaN` or `Inf` components.
    #[error("non-finite pose for {frame}")]
    NonFinitePose {
        /// Display name of the frame whose pose was rejected.
        frame: String,
    },
}

impl SimError {
    /// Create an invalid time grid error.
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidTimeGrid {
            reason: reason.into(),
        }
    }

    /// Check if this is a time grid construction error.
    #[must_use]
    pub fn is_grid_error(&self) -> bool {
        matches!(self, Self::InvalidTimeGrid { .. })
    }

    /// Check if this is an index error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::GridIndexOutOfRange { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::GridIndexOutOfRange { index: 101, len: 101 };
        let msg = err.to_string();
        assert!(msg.contains("101"));

        let err = SimError::invalid_grid("times must increase");
        assert!(err.to_string().contains("increase"));
    }

    #[test]
    fn test_error_predicates() {
        let err = SimError::invalid_grid("empty");
        assert!(err.is_grid_error());
        assert!(!err.is_out_of_range());

        let err = SimError::GridIndexOutOfRange { index: 3, len: 2 };
        assert!(err.is_out_of_range());
        assert!(!err.is_grid_error());
    }
}

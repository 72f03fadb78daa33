//! Drag lifecycle: `Idle -> Dragging -> Idle`.
//!
//! ## Usage
//!
//! 1) [`GestureState::begin`] on pointer-down with the pointer x position.
//! 2) [`GestureState::drag_to`] on every move; it returns the drag delta, which
//!    [`elastic_offset`] turns into a live (never committed) track offset.
//! 3) [`GestureState::release`] on pointer-up or pointer-cancel; it returns the
//!    [`ReleaseOutcome`] the engine turns into `prev()`, `next()` or a snap back.
//!
//! ```
//! use vizij_carousel_core::gesture::{GestureState, ReleaseOutcome};
//!
//! let mut g = GestureState::default();
//! g.begin(400.0);
//! g.drag_to(340.0);
//! let release = g.release(50.0).unwrap();
//! assert_eq!(release.outcome, ReleaseOutcome::Next);
//! assert!(!g.is_dragging());
//! ```

use serde::{Deserialize, Serialize};

/// Current gesture state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        start_x: f64,
        current_x: f64,
    },
}

/// How a release was classified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseOutcome {
    /// Dragged right past the threshold: reveal earlier content.
    Prev,
    /// Dragged left past the threshold.
    Next,
    /// Sub-threshold drag: snap back to the current slide.
    Cancel,
}

/// Result of ending a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release {
    /// `current_x - start_x` at release time.
    pub diff: f64,
    pub outcome: ReleaseOutcome,
}

impl GestureState {
    /// Enter `Dragging` at `x`. Returns `false` (and changes nothing) if already dragging.
    pub fn begin(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = GestureState::Dragging {
            start_x: x,
            current_x: x,
        };
        true
    }

    /// Record a pointer move. Returns the drag delta `current_x - start_x`, or `None`
    /// when idle (stray move after release).
    pub fn drag_to(&mut self, x: f64) -> Option<f64> {
        match self {
            GestureState::Dragging { start_x, current_x } => {
                *current_x = x;
                Some(x - *start_x)
            }
            GestureState::Idle => None,
        }
    }

    /// Leave `Dragging`, classifying the gesture against `threshold` (exclusive).
    /// Returns `None` when idle.
    pub fn release(&mut self, threshold: f64) -> Option<Release> {
        let diff = self.diff()?;
        *self = GestureState::Idle;
        let outcome = if diff.abs() > threshold {
            if diff > 0.0 {
                ReleaseOutcome::Prev
            } else {
                ReleaseOutcome::Next
            }
        } else {
            ReleaseOutcome::Cancel
        };
        Some(Release { diff, outcome })
    }

    /// Drop any drag without classifying it (teardown).
    pub fn reset(&mut self) {
        *self = GestureState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }

    /// Current drag delta, `None` while idle.
    pub fn diff(&self) -> Option<f64> {
        match *self {
            GestureState::Dragging { start_x, current_x } => Some(current_x - start_x),
            GestureState::Idle => None,
        }
    }
}

/// Live offset for a drag: `committed - diff`, damped by `resistance` outside `[0, max_offset]`.
///
/// The result is deliberately not clamped; it may be negative or exceed
/// `max_offset` while the pointer is held.
pub fn elastic_offset(committed: f64, diff: f64, max_offset: f64, resistance: f64) -> f64 {
    let raw = committed - diff;
    if raw < 0.0 {
        raw * resistance
    } else if raw > max_offset {
        max_offset + (raw - max_offset) * resistance
    } else {
        raw
    }
}

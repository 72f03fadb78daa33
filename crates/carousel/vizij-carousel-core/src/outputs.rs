//! Output contracts from the carousel engine.
//!
//! `changes` is an ordered list of render operations the host applies to the
//! track and controls, in order (transition toggles must bracket transforms as
//! emitted). `events` carries semantic signals for analytics, listener wiring
//! and tests.

use serde::{Deserialize, Serialize};

use crate::gesture::ReleaseOutcome;
use crate::listeners::ListenerKind;

/// One render operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Change {
    /// Translate the track left by `offset` pixels.
    SetTransform { offset: f64 },
    /// `Some(ms)` enables an eased transform transition, `None` suspends it.
    SetTransition { duration_ms: Option<u32> },
    /// Force a synchronous layout flush (e.g. read `offsetHeight`).
    FlushLayout,
    /// Mark exactly this pagination dot active.
    SetActiveDot { index: usize },
    SetButtons {
        prev_disabled: bool,
        next_disabled: bool,
    },
    /// Toggle the "grabbing" affordance on the wrapper.
    SetGrabbing { grabbing: bool },
}

/// Discrete semantic signals emitted while processing an update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CoreEvent {
    Mounted,
    SlideChanged {
        from: usize,
        to: usize,
    },
    DragStarted {
        x: f64,
    },
    DragReleased {
        diff: f64,
        outcome: ReleaseOutcome,
    },
    AutoplayStarted,
    AutoplayStopped,
    /// Autoplay period elapsed and `next()` was requested.
    AutoplayTick,
    GeometryRecomputed {
        slide_count: usize,
        total_width: f64,
        container_width: f64,
    },
    ListenersAttached {
        kinds: Vec<ListenerKind>,
    },
    ListenersDetached {
        kinds: Vec<ListenerKind>,
    },
    Destroyed,
}

/// Outputs returned by `Carousel::update()` and the direct navigation calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last transform offset emitted in this batch, if any.
    pub fn last_transform(&self) -> Option<f64> {
        self.changes.iter().rev().find_map(|c| match c {
            Change::SetTransform { offset } => Some(*offset),
            _ => None,
        })
    }
}

/// Projected visible state after the most recent render sync.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Offset currently applied to the track (live drag offset while dragging).
    pub transform: f64,
    /// Transition currently applied to the track; `None` while suspended.
    pub transition_ms: Option<u32>,
    pub active_dot: Option<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub grabbing: bool,
}

impl ViewState {
    pub(crate) fn new(transition_ms: u32) -> Self {
        Self {
            transform: 0.0,
            transition_ms: Some(transition_ms),
            active_dot: None,
            prev_disabled: false,
            next_disabled: false,
            grabbing: false,
        }
    }

    /// Fold one change into the projected state.
    pub(crate) fn apply(&mut self, change: &Change) {
        match change {
            Change::SetTransform { offset } => self.transform = *offset,
            Change::SetTransition { duration_ms } => self.transition_ms = *duration_ms,
            Change::FlushLayout => {}
            Change::SetActiveDot { index } => self.active_dot = Some(*index),
            Change::SetButtons {
                prev_disabled,
                next_disabled,
            } => {
                self.prev_disabled = *prev_disabled;
                self.next_disabled = *next_disabled;
            }
            Change::SetGrabbing { grabbing } => self.grabbing = *grabbing,
        }
    }
}

//! Per-instance listener ownership.
//!
//! Each carousel registers only the listeners it owns, including the
//! document/window-level ones, and removes them exactly once on teardown. The
//! engine does not touch the DOM; it reports the set through
//! `CoreEvent::ListenersAttached` / `CoreEvent::ListenersDetached` and the
//! adapter performs the actual (de)registration.

use serde::{Deserialize, Serialize};

/// Listener owned by a single carousel instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// Pointer/touch down on the container.
    ContainerPointerDown,
    /// Document-level pointer/touch move (drag continues outside the container).
    DocumentPointerMove,
    /// Document-level pointer/touch up and cancel.
    DocumentPointerUp,
    /// Clicks on prev/next buttons and pagination dots.
    ControlClick,
    /// Keydown on the focusable wrapper.
    WrapperKeyDown,
    /// Hover enter/leave on the wrapper; only needed to pause autoplay.
    WrapperHover,
    /// Window resize.
    WindowResize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Detached,
    Attached,
    Released,
}

/// Listener set of one instance with attach-once / detach-once semantics.
#[derive(Clone, Debug, Default)]
pub struct ListenerSet {
    kinds: Vec<ListenerKind>,
    phase: Phase,
}

impl ListenerSet {
    /// Listener set for an instance; hover is only owned when autoplay is enabled.
    pub fn for_instance(autoplay: bool) -> Self {
        let mut kinds = vec![
            ListenerKind::ContainerPointerDown,
            ListenerKind::DocumentPointerMove,
            ListenerKind::DocumentPointerUp,
            ListenerKind::ControlClick,
            ListenerKind::WrapperKeyDown,
        ];
        if autoplay {
            kinds.push(ListenerKind::WrapperHover);
        }
        kinds.push(ListenerKind::WindowResize);
        Self {
            kinds,
            phase: Phase::Detached,
        }
    }

    /// Mark listeners attached. Returns the kinds to register, empty if already
    /// attached or released.
    pub fn attach(&mut self) -> Vec<ListenerKind> {
        if self.phase != Phase::Detached {
            return Vec::new();
        }
        self.phase = Phase::Attached;
        self.kinds.clone()
    }

    /// Mark listeners released. Returns the kinds to remove, empty on every call
    /// after the first. A released set can never be re-attached.
    pub fn detach(&mut self) -> Vec<ListenerKind> {
        let previous = self.phase;
        self.phase = Phase::Released;
        if previous == Phase::Attached {
            self.kinds.clone()
        } else {
            Vec::new()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.phase == Phase::Attached
    }

    pub fn owns(&self, kind: ListenerKind) -> bool {
        self.kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_only_owned_with_autoplay() {
        assert!(!ListenerSet::for_instance(false).owns(ListenerKind::WrapperHover));
        assert!(ListenerSet::for_instance(true).owns(ListenerKind::WrapperHover));
    }

    #[test]
    fn attach_and_detach_exactly_once() {
        let mut set = ListenerSet::for_instance(false);
        let attached = set.attach();
        assert_eq!(attached.len(), 6);
        assert!(set.attach().is_empty());
        assert!(set.is_attached());
        assert_eq!(set.detach(), attached);
        assert!(set.detach().is_empty());
        assert!(set.attach().is_empty());
    }

    #[test]
    fn detach_before_attach_releases_nothing() {
        let mut set = ListenerSet::for_instance(true);
        assert!(set.detach().is_empty());
        assert!(set.attach().is_empty());
    }
}

//! Carousel: state ownership and public API.
//!
//! Methods:
//! - new, with_config, mount, update (events → debounce → autoplay), go_to/prev/next,
//!   recompute_geometry, start_autoplay/stop_autoplay, destroy
//!
//! Every mutating call clears and refills the per-call [`Outputs`]. Once
//! [`Carousel::destroy`] has run, every call returns empty outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{Config, Settings};
use crate::error::SettingsError;
use crate::geometry::{GeometrySnapshot, SlideLayout};
use crate::gesture::{elastic_offset, GestureState, ReleaseOutcome};
use crate::inputs::{InputEvent, Inputs, Key};
use crate::listeners::ListenerSet;
use crate::navigation::{go_to_target, next_target, prev_target};
use crate::outputs::{Change, CoreEvent, Outputs, ViewState};
use crate::timer::{DebounceTimer, IntervalTimer};

/// Mutable navigation state. Written by navigation, gesture and autoplay paths only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselState {
    pub current_index: usize,
    /// Last committed (clamped) offset.
    pub current_offset: f64,
    pub is_dragging: bool,
    pub autoplay_active: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Destroyed,
}

/// One carousel instance bound to one container.
pub struct Carousel {
    // Owned data
    settings: Settings,
    cfg: Config,
    layout: Box<dyn SlideLayout>,
    geometry: GeometrySnapshot,
    state: CarouselState,

    // Systems
    gesture: GestureState,
    autoplay: IntervalTimer,
    resize: DebounceTimer,
    listeners: ListenerSet,
    lifecycle: Lifecycle,
    hovered: bool,
    /// Autoplay was running when the current drag began (or hover ended mid-drag).
    resume_after_drag: bool,

    // Projection and per-call outputs
    view: ViewState,
    outputs: Outputs,
}

impl fmt::Debug for Carousel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("settings", &self.settings)
            .field("cfg", &self.cfg)
            .field("geometry", &self.geometry)
            .field("state", &self.state)
            .field("gesture", &self.gesture)
            .field("lifecycle", &self.lifecycle)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl Carousel {
    /// Bind a new carousel to `layout`. Geometry is measured immediately; nothing is
    /// rendered until [`Carousel::mount`] (or the first update) runs.
    pub fn new(settings: Settings, layout: impl SlideLayout + 'static) -> Self {
        Self::from_boxed(settings, Box::new(layout))
    }

    /// Same as [`Carousel::new`] for an already boxed layout.
    pub fn from_boxed(settings: Settings, layout: Box<dyn SlideLayout>) -> Self {
        let geometry = GeometrySnapshot::measure(layout.as_ref());
        let listeners = ListenerSet::for_instance(settings.autoplay);
        let view = ViewState::new(settings.transition_speed_ms);
        Self {
            settings,
            cfg: Config::default(),
            layout,
            geometry,
            state: CarouselState::default(),
            gesture: GestureState::Idle,
            autoplay: IntervalTimer::new(),
            resize: DebounceTimer::new(),
            listeners,
            lifecycle: Lifecycle::Created,
            hovered: false,
            resume_after_drag: false,
            view,
            outputs: Outputs::default(),
        }
    }

    /// Parse the container's flat settings JSON and bind to `layout`.
    pub fn from_settings_json(
        json: &str,
        layout: impl SlideLayout + 'static,
    ) -> Result<Self, SettingsError> {
        let settings = Settings::from_json(json)?;
        Ok(Self::new(settings, layout))
    }

    /// Replace the engine tunables.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.geometry
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Whether the pointer is currently over the wrapper.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Swap the layout source. Takes effect on the next geometry recompute
    /// (`Resize` after the debounce, `LayoutChanged`, or [`Carousel::recompute_geometry`]).
    pub fn set_layout(&mut self, layout: impl SlideLayout + 'static) {
        self.layout = Box::new(layout);
    }

    /// Attach listeners, render the initial state and start autoplay.
    pub fn mount(&mut self) -> &Outputs {
        self.outputs.clear();
        if self.lifecycle == Lifecycle::Created {
            self.mount_inner();
        }
        &self.outputs
    }

    /// Apply `inputs` in order, then advance the resize debounce and autoplay timers by `dt_ms`.
    pub fn update(&mut self, dt_ms: f64, inputs: Inputs) -> &Outputs {
        if !self.begin() {
            return &self.outputs;
        }

        // 1) Input events, serially
        for event in inputs.events {
            self.apply_event(event);
        }

        // 2) Debounced geometry recompute
        if self.resize.advance(dt_ms) {
            self.relayout();
        }

        // 3) Autoplay ticks
        let due = self.autoplay.advance(dt_ms);
        let ticks = due.min(self.cfg.max_catch_up_ticks);
        if ticks < due {
            log::debug!("autoplay catch-up capped: {due} periods elapsed, applying {ticks}");
        }
        for _ in 0..ticks {
            self.outputs.push_event(CoreEvent::AutoplayTick);
            self.nav_next();
        }

        &self.outputs
    }

    /// Navigate to slide `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> &Outputs {
        if self.begin() {
            self.nav_go_to(index);
        }
        &self.outputs
    }

    pub fn prev(&mut self) -> &Outputs {
        if self.begin() {
            self.nav_prev();
        }
        &self.outputs
    }

    pub fn next(&mut self) -> &Outputs {
        if self.begin() {
            self.nav_next();
        }
        &self.outputs
    }

    /// Re-measure the layout now and re-render without animation.
    pub fn recompute_geometry(&mut self) -> &GeometrySnapshot {
        if self.begin() {
            self.relayout();
        }
        &self.geometry
    }

    /// Outputs produced by the most recent call.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn start_autoplay(&mut self) -> &Outputs {
        if self.begin() {
            self.autoplay_start();
        }
        &self.outputs
    }

    pub fn stop_autoplay(&mut self) -> &Outputs {
        if self.begin() {
            self.autoplay_stop();
        }
        &self.outputs
    }

    /// Tear down: stop timers, drop any drag, detach listeners. Idempotent; the
    /// instance produces no further outputs afterwards.
    pub fn destroy(&mut self) -> &Outputs {
        self.outputs.clear();
        if self.lifecycle == Lifecycle::Destroyed {
            return &self.outputs;
        }
        self.autoplay_stop();
        self.resume_after_drag = false;
        self.resize.cancel();
        self.gesture.reset();
        self.state.is_dragging = false;
        let kinds = self.listeners.detach();
        if !kinds.is_empty() {
            self.outputs
                .push_event(CoreEvent::ListenersDetached { kinds });
        }
        self.lifecycle = Lifecycle::Destroyed;
        self.outputs.push_event(CoreEvent::Destroyed);
        log::debug!("carousel destroyed");
        &self.outputs
    }
}

// Internals
impl Carousel {
    /// Clear outputs and mount lazily. Returns `false` once destroyed.
    fn begin(&mut self) -> bool {
        self.outputs.clear();
        match self.lifecycle {
            Lifecycle::Destroyed => false,
            Lifecycle::Created => {
                self.mount_inner();
                true
            }
            Lifecycle::Mounted => true,
        }
    }

    fn mount_inner(&mut self) {
        self.lifecycle = Lifecycle::Mounted;
        let kinds = self.listeners.attach();
        if !kinds.is_empty() {
            self.outputs
                .push_event(CoreEvent::ListenersAttached { kinds });
        }
        self.update_carousel(true);
        self.autoplay_start();
        self.outputs.push_event(CoreEvent::Mounted);
        log::debug!(
            "carousel mounted: {} slides, total {}px, container {}px",
            self.geometry.slide_count(),
            self.geometry.total_width,
            self.geometry.container_width
        );
    }

    fn emit(&mut self, change: Change) {
        self.view.apply(&change);
        self.outputs.push_change(change);
    }

    fn apply_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x } => self.drag_start(x),
            InputEvent::PointerMove { x } => self.drag_move(x),
            InputEvent::PointerUp | InputEvent::PointerCancel => self.drag_end(),
            InputEvent::PrevClicked => self.nav_prev(),
            InputEvent::NextClicked => self.nav_next(),
            InputEvent::DotClicked { index } => self.nav_go_to(index),
            InputEvent::Key { key } => match key {
                Key::ArrowLeft => self.nav_prev(),
                Key::ArrowRight => self.nav_next(),
                Key::Other(_) => {}
            },
            InputEvent::HoverEnter => self.hover_enter(),
            InputEvent::HoverLeave => self.hover_leave(),
            InputEvent::Resize => self.resize.schedule(self.cfg.resize_debounce_ms),
            InputEvent::LayoutChanged => self.relayout(),
        }
    }

    /// Re-measure and re-render without animation. A live drag keeps its visual
    /// offset; the release re-syncs against the new geometry.
    fn relayout(&mut self) {
        self.recompute_inner();
        if !self.state.is_dragging {
            self.update_carousel(false);
        }
    }

    fn recompute_inner(&mut self) {
        self.geometry = GeometrySnapshot::measure(self.layout.as_ref());
        let count = self.geometry.slide_count();
        if count == 0 {
            self.state.current_index = 0;
        } else if self.state.current_index >= count {
            self.state.current_index = count - 1;
        }
        self.outputs.push_event(CoreEvent::GeometryRecomputed {
            slide_count: count,
            total_width: self.geometry.total_width,
            container_width: self.geometry.container_width,
        });
        log::debug!(
            "geometry recomputed: {} slides, total {}px, container {}px",
            count,
            self.geometry.total_width,
            self.geometry.container_width
        );
    }

    // ---- Navigation ----

    fn nav_go_to(&mut self, index: usize) {
        if self.state.is_dragging {
            return;
        }
        if let Some(target) = go_to_target(&self.geometry, index) {
            self.commit_index(target);
        }
    }

    fn nav_prev(&mut self) {
        if self.state.is_dragging {
            return;
        }
        let target = prev_target(&self.geometry, self.state.current_index, self.settings.r#loop);
        if let Some(target) = target {
            self.commit_index(target);
        }
    }

    fn nav_next(&mut self) {
        if self.state.is_dragging {
            return;
        }
        let target = next_target(&self.geometry, self.state.current_index, self.settings.r#loop);
        if let Some(target) = target {
            self.commit_index(target);
        }
    }

    fn commit_index(&mut self, to: usize) {
        let from = self.state.current_index;
        self.state.current_index = to;
        self.update_carousel(true);
        if from != to {
            self.outputs.push_event(CoreEvent::SlideChanged { from, to });
            log::debug!("slide {from} -> {to} (offset {})", self.state.current_offset);
        }
    }

    // ---- Render/state sync ----

    /// Project the current index onto the track, pagination and controls.
    fn update_carousel(&mut self, animate: bool) {
        let Some(position) = self.geometry.position(self.state.current_index).copied() else {
            return;
        };
        let offset = self.geometry.clamp(position.offset);
        self.state.current_offset = offset;

        let speed = self.transition();
        if animate {
            self.emit(Change::SetTransition { duration_ms: speed });
            self.emit(Change::SetTransform { offset });
        } else {
            self.emit(Change::SetTransition { duration_ms: None });
            self.emit(Change::SetTransform { offset });
            self.emit(Change::FlushLayout);
            self.emit(Change::SetTransition { duration_ms: speed });
        }

        self.emit(Change::SetActiveDot {
            index: self.state.current_index,
        });
        let (prev_disabled, next_disabled) = self.button_states();
        self.emit(Change::SetButtons {
            prev_disabled,
            next_disabled,
        });
    }

    /// Eased transition for committed moves. `transitionSpeed: 0` is honored as an
    /// instant move; it does not fall back to the 500ms default.
    fn transition(&self) -> Option<u32> {
        Some(self.settings.transition_speed_ms)
    }

    fn button_states(&self) -> (bool, bool) {
        if self.settings.r#loop {
            return (false, false);
        }
        let index = self.state.current_index;
        let last = self.geometry.slide_count().saturating_sub(1);
        let tail = self.geometry.total_width - self.geometry.container_width - self.cfg.end_tolerance_px;
        let prev_disabled = index == 0;
        let next_disabled = index == last || self.state.current_offset >= tail;
        (prev_disabled, next_disabled)
    }

    // ---- Gesture ----

    fn drag_start(&mut self, x: f64) {
        if !self.gesture.begin(x) {
            return;
        }
        self.state.is_dragging = true;
        self.emit(Change::SetGrabbing { grabbing: true });
        self.emit(Change::SetTransition { duration_ms: None });
        self.resume_after_drag = self.autoplay.is_running();
        self.autoplay_stop();
        self.outputs.push_event(CoreEvent::DragStarted { x });
    }

    fn drag_move(&mut self, x: f64) {
        let Some(diff) = self.gesture.drag_to(x) else {
            return;
        };
        // Bound by the clamped range so a track narrower than its container
        // stays put at rest instead of resisting from a negative edge.
        let visual = elastic_offset(
            self.state.current_offset,
            diff,
            self.geometry.max_offset(),
            self.cfg.edge_resistance,
        );
        log::trace!("drag diff {diff} -> visual offset {visual}");
        self.emit(Change::SetTransform { offset: visual });
    }

    fn drag_end(&mut self) {
        let Some(release) = self.gesture.release(self.cfg.drag_threshold_px) else {
            return;
        };
        self.state.is_dragging = false;
        self.emit(Change::SetGrabbing { grabbing: false });
        self.emit(Change::SetTransition {
            duration_ms: self.transition(),
        });
        self.outputs.push_event(CoreEvent::DragReleased {
            diff: release.diff,
            outcome: release.outcome,
        });

        let changes_before = self.outputs.changes.len();
        match release.outcome {
            ReleaseOutcome::Prev => self.nav_prev(),
            ReleaseOutcome::Next => self.nav_next(),
            ReleaseOutcome::Cancel => {}
        }
        // Sub-threshold drags, and navigations that were no-ops at either end,
        // snap back to the committed slide.
        if self.outputs.changes.len() == changes_before {
            self.update_carousel(true);
        }

        if std::mem::take(&mut self.resume_after_drag) && !self.hovered {
            self.autoplay_start();
        }
    }

    fn hover_enter(&mut self) {
        self.hovered = true;
        if !self.settings.autoplay {
            return;
        }
        self.resume_after_drag = false;
        self.autoplay_stop();
    }

    fn hover_leave(&mut self) {
        self.hovered = false;
        if !self.settings.autoplay {
            return;
        }
        if self.state.is_dragging {
            self.resume_after_drag = true;
        } else {
            self.autoplay_start();
        }
    }

    // ---- Autoplay ----

    fn autoplay_start(&mut self) {
        if !self.settings.autoplay {
            return;
        }
        if self.state.is_dragging {
            self.resume_after_drag = true;
            return;
        }
        let was_running = self.autoplay.stop();
        self.autoplay
            .start(f64::from(self.settings.autoplay_speed_ms));
        self.state.autoplay_active = self.autoplay.is_running();
        if !was_running && self.state.autoplay_active {
            self.outputs.push_event(CoreEvent::AutoplayStarted);
            log::debug!("autoplay started ({}ms)", self.settings.autoplay_speed_ms);
        }
    }

    fn autoplay_stop(&mut self) {
        if self.autoplay.stop() {
            self.outputs.push_event(CoreEvent::AutoplayStopped);
            log::debug!("autoplay stopped");
        }
        self.state.autoplay_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FixedLayout;

    fn carousel(loop_: bool) -> Carousel {
        let settings = Settings {
            r#loop: loop_,
            ..Settings::default()
        };
        let mut c = Carousel::new(settings, FixedLayout::new(640.0, vec![300.0; 5], 20.0));
        c.mount();
        c
    }

    #[test]
    fn mount_renders_first_slide() {
        let c = carousel(false);
        assert_eq!(c.view().active_dot, Some(0));
        assert!(c.view().prev_disabled);
        assert!(!c.view().next_disabled);
        assert_eq!(c.view().transform, 0.0);
    }

    #[test]
    fn non_animated_sync_brackets_transform_with_transition_toggle() {
        let mut c = carousel(false);
        c.go_to(2);
        c.update(0.0, Inputs::one(InputEvent::LayoutChanged));
        let ops: Vec<&Change> = c
            .outputs()
            .changes
            .iter()
            .take(4)
            .collect();
        assert_eq!(
            ops,
            vec![
                &Change::SetTransition { duration_ms: None },
                &Change::SetTransform { offset: 640.0 },
                &Change::FlushLayout,
                &Change::SetTransition {
                    duration_ms: Some(500)
                },
            ]
        );
    }

    #[test]
    fn navigation_is_ignored_mid_drag() {
        let mut c = carousel(false);
        c.update(0.0, Inputs::one(InputEvent::PointerDown { x: 100.0 }));
        c.go_to(3);
        c.update(
            0.0,
            Inputs::new(vec![
                InputEvent::NextClicked,
                InputEvent::Key {
                    key: Key::ArrowRight,
                },
            ]),
        );
        assert_eq!(c.current_index(), 0);
        assert!(c.state().is_dragging);
    }

    #[test]
    fn shrinking_layout_pulls_index_back_into_range() {
        let mut c = carousel(false);
        c.go_to(4);
        c.set_layout(FixedLayout::new(640.0, vec![300.0; 2], 20.0));
        c.recompute_geometry();
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.view().active_dot, Some(1));
    }
}

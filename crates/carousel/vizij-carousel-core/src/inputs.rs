//! Input contracts for the carousel engine.
//!
//! Adapters (web/native) translate DOM or windowing events into [`InputEvent`]s
//! and pass them to `Carousel::update()`. Events are applied serially in order.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Inputs {
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl Inputs {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self { events }
    }

    pub fn one(event: InputEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

impl From<Vec<InputEvent>> for Inputs {
    fn from(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

/// One host event. `x` values are page coordinates in pixels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    /// Pointer cancel or leave; handled exactly like [`InputEvent::PointerUp`].
    #[serde(alias = "pointer_leave")]
    PointerCancel,
    PrevClicked,
    NextClicked,
    DotClicked { index: usize },
    /// Key press while the container has focus.
    Key { key: Key },
    HoverEnter,
    HoverLeave,
    /// Window resize tick; geometry is recomputed after the debounce period.
    Resize,
    /// Slide content changed size (late image load, template swap); recompute now.
    LayoutChanged,
}

/// Keys the carousel reacts to. Anything else deserializes to [`Key::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            _ => Key::Other(value),
        }
    }
}

impl From<Key> for String {
    fn from(value: Key) -> Self {
        match value {
            Key::ArrowLeft => "ArrowLeft".to_string(),
            Key::ArrowRight => "ArrowRight".to_string(),
            Key::Other(s) => s,
        }
    }
}

//! Vizij Carousel Core (host-agnostic)
//!
//! Viewport and gesture engine for a horizontally scrolling strip of
//! variably-sized slides. The crate owns the position table, offset clamping,
//! prev/next/go-to rules, drag-to-offset with edge resistance, release
//! classification, autoplay and the resize debounce. It renders nothing: every
//! call returns an ordered list of render [`Change`]s plus semantic
//! [`CoreEvent`]s for the adapter (WASM/native) to apply.
//!
//! Time never comes from a wall clock. Adapters drive the engine with
//! [`Carousel::update`], passing elapsed milliseconds and the input events
//! collected since the previous call.

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod ids;
pub mod inputs;
pub mod listeners;
pub mod navigation;
pub mod outputs;
pub mod registry;
pub mod sizing;
pub mod timer;

// Re-exports for consumers (adapters)
pub use config::{Config, Settings, Spacing};
pub use engine::{Carousel, CarouselState};
pub use error::{CarouselError, RegistryError, SettingsError};
pub use geometry::{clamp, FixedLayout, GeometrySnapshot, SlideLayout, SlidePosition};
pub use gesture::{elastic_offset, GestureState, Release, ReleaseOutcome};
pub use ids::ContainerId;
pub use inputs::{InputEvent, Inputs, Key};
pub use listeners::{ListenerKind, ListenerSet};
pub use outputs::{Change, CoreEvent, Outputs, ViewState};
pub use registry::CarouselRegistry;
pub use sizing::{
    layout_from_specs, slide_width, AspectRatio, MediaMetadata, MetadataTable, NoMetadata,
    SlideKind, SlideSpec,
};
pub use timer::{DebounceTimer, IntervalTimer};

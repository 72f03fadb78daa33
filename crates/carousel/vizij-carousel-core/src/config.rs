//! Host settings and engine tunables.
//!
//! [`Settings`] is the per-instance record the rendering layer attaches to the
//! container as flat JSON (`autoplay`, `autoplaySpeed`, `loop`, `transitionSpeed`,
//! `slideSpacing`). It is immutable for the lifetime of a carousel.
//!
//! [`Config`] collects the engine constants (drag threshold, edge resistance,
//! tail tolerance, resize quiet period). Hosts rarely need to change them.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Per-instance carousel settings as serialized by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Advance automatically while idle.
    pub autoplay: bool,
    /// Autoplay period in milliseconds. Must be non-zero when `autoplay` is set.
    #[serde(rename = "autoplaySpeed", alias = "autoplaySpeedMs")]
    pub autoplay_speed_ms: u32,
    /// Wrap index 0 and the last index into each other.
    pub r#loop: bool,
    /// Track transition duration in milliseconds; `0` applies transforms instantly.
    #[serde(rename = "transitionSpeed", alias = "transitionSpeedMs")]
    pub transition_speed_ms: u32,
    /// Trailing spacing after each slide, when the host reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_spacing: Option<Spacing>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autoplay: false,
            autoplay_speed_ms: 3000,
            r#loop: false,
            transition_speed_ms: 500,
            slide_spacing: None,
        }
    }
}

impl Settings {
    /// Parse the flat settings JSON attached to a container and validate it.
    pub fn from_json(s: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.autoplay && self.autoplay_speed_ms == 0 {
            return Err(SettingsError::InvalidAutoplaySpeed);
        }
        Ok(())
    }

    /// Spacing in pixels, `0` when absent or expressed in a non-pixel unit.
    pub fn spacing_px(&self) -> f64 {
        match &self.slide_spacing {
            Some(sp) if sp.unit == "px" && sp.size.is_finite() => sp.size.max(0.0),
            _ => 0.0,
        }
    }
}

/// A CSS length as reported by the authoring surface (`{ "size": 20, "unit": "px" }`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default)]
    pub size: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "px".to_string()
}

impl Spacing {
    pub fn px(size: f64) -> Self {
        Self {
            size,
            unit: default_unit(),
        }
    }
}

/// Engine tunables. Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum horizontal drag distance (exclusive) that commits a navigation on release.
    pub drag_threshold_px: f64,
    /// Damping multiplier applied to drag movement beyond either end of the track.
    pub edge_resistance: f64,
    /// Sub-pixel tolerance when deciding that the track sits at its tail.
    pub end_tolerance_px: f64,
    /// Quiet period after the last resize before geometry is recomputed.
    pub resize_debounce_ms: f64,
    /// Most autoplay advances applied by one `update`, e.g. after a throttled background tab.
    pub max_catch_up_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drag_threshold_px: 50.0,
            edge_resistance: 0.3,
            end_tolerance_px: 1.0,
            resize_debounce_ms: 250.0,
            max_catch_up_ticks: 8,
        }
    }
}

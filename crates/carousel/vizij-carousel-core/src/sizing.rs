//! Slide widths from carousel height and aspect ratio.
//!
//! Image, gallery and video slides are as tall as the carousel and as wide as
//! their aspect ratio dictates; template slides carry an explicit width. For the
//! `original` ratio the natural size of the media is looked up by id through
//! [`MediaMetadata`]. That lookup belongs to the hosting service; only the trait
//! boundary lives here.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::geometry::FixedLayout;

/// Ratio used whenever a ratio is unknown or unusable.
pub const DEFAULT_RATIO: f64 = 16.0 / 9.0;

/// Width of a template slide with no explicit width.
pub const DEFAULT_TEMPLATE_WIDTH: f64 = 400.0;

/// Kind of content a slide holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    #[default]
    Image,
    Gallery,
    Video,
    Template,
}

/// Aspect ratio (width / height) of a media slide.
///
/// Serialized with the authoring surface's option keys: `"1-1"`, `"2-3"`, `"3-2"`,
/// `"4-3"`, `"16-9"`, `"21-9"`, `"original"`, or a bare number for a custom ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RatioRepr", into = "RatioRepr")]
pub enum AspectRatio {
    Square,
    Portrait2x3,
    Landscape3x2,
    Standard4x3,
    #[default]
    Wide16x9,
    Ultrawide21x9,
    Custom(f64),
    /// Natural ratio of the referenced media.
    Original,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RatioRepr {
    Custom(f64),
    Key(String),
}

impl From<RatioRepr> for AspectRatio {
    fn from(value: RatioRepr) -> Self {
        match value {
            RatioRepr::Custom(r) => AspectRatio::Custom(r),
            RatioRepr::Key(key) => AspectRatio::from_key(&key),
        }
    }
}

impl From<AspectRatio> for RatioRepr {
    fn from(value: AspectRatio) -> Self {
        match value {
            AspectRatio::Custom(r) => RatioRepr::Custom(r),
            other => RatioRepr::Key(other.key().to_string()),
        }
    }
}

impl AspectRatio {
    /// Parse an option key. Unknown keys fall back to 16:9.
    pub fn from_key(key: &str) -> Self {
        match key {
            "1-1" => AspectRatio::Square,
            "2-3" => AspectRatio::Portrait2x3,
            "3-2" => AspectRatio::Landscape3x2,
            "4-3" => AspectRatio::Standard4x3,
            "16-9" => AspectRatio::Wide16x9,
            "21-9" => AspectRatio::Ultrawide21x9,
            "original" => AspectRatio::Original,
            other => match other.parse::<f64>() {
                Ok(r) => AspectRatio::Custom(r),
                Err(_) => AspectRatio::Wide16x9,
            },
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1-1",
            AspectRatio::Portrait2x3 => "2-3",
            AspectRatio::Landscape3x2 => "3-2",
            AspectRatio::Standard4x3 => "4-3",
            AspectRatio::Wide16x9 => "16-9",
            AspectRatio::Ultrawide21x9 => "21-9",
            AspectRatio::Custom(_) => "custom",
            AspectRatio::Original => "original",
        }
    }

    /// Fixed ratio, `None` for [`AspectRatio::Original`] which needs a lookup.
    pub fn fixed(&self) -> Option<f64> {
        let r = match self {
            AspectRatio::Square => 1.0,
            AspectRatio::Portrait2x3 => 2.0 / 3.0,
            AspectRatio::Landscape3x2 => 3.0 / 2.0,
            AspectRatio::Standard4x3 => 4.0 / 3.0,
            AspectRatio::Wide16x9 => 16.0 / 9.0,
            AspectRatio::Ultrawide21x9 => 21.0 / 9.0,
            AspectRatio::Custom(r) if r.is_finite() && *r > 0.0 => *r,
            AspectRatio::Custom(_) => DEFAULT_RATIO,
            AspectRatio::Original => return None,
        };
        Some(r)
    }
}

/// Natural dimensions of hosted media, queried by attachment id.
pub trait MediaMetadata {
    /// `(width, height)` in pixels, `None` when the media is unknown.
    fn natural_size(&self, media_id: u64) -> Option<(f64, f64)>;
}

/// Metadata source that knows nothing; every `original` ratio falls back to 16:9.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoMetadata;

impl MediaMetadata for NoMetadata {
    fn natural_size(&self, _media_id: u64) -> Option<(f64, f64)> {
        None
    }
}

/// In-memory metadata table, e.g. prefetched alongside the slide markup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetadataTable {
    sizes: HashMap<u64, (f64, f64)>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, media_id: u64, width: f64, height: f64) {
        self.sizes.insert(media_id, (width, height));
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl MediaMetadata for MetadataTable {
    fn natural_size(&self, media_id: u64) -> Option<(f64, f64)> {
        self.sizes.get(&media_id).copied()
    }
}

/// Sizing-relevant description of one slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSpec {
    pub kind: SlideKind,
    pub aspect_ratio: AspectRatio,
    /// Attachment id used to resolve [`AspectRatio::Original`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<u64>,
    /// Explicit width for template slides, in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_width: Option<f64>,
}

impl SlideSpec {
    pub fn media(kind: SlideKind, aspect_ratio: AspectRatio) -> Self {
        Self {
            kind,
            aspect_ratio,
            ..Self::default()
        }
    }

    pub fn template(width: f64) -> Self {
        Self {
            kind: SlideKind::Template,
            template_width: Some(width),
            ..Self::default()
        }
    }
}

/// Effective width/height ratio of `spec`, resolving `original` through `metadata`.
pub fn resolve_ratio(spec: &SlideSpec, metadata: &dyn MediaMetadata) -> f64 {
    if let Some(r) = spec.aspect_ratio.fixed() {
        return r;
    }
    spec.media_id
        .and_then(|id| metadata.natural_size(id))
        .filter(|(w, h)| *h > 0.0 && w.is_finite() && h.is_finite())
        .map(|(w, h)| w / h)
        .unwrap_or(DEFAULT_RATIO)
}

/// Content width of one slide for a carousel of `height` pixels.
pub fn slide_width(spec: &SlideSpec, height: f64, metadata: &dyn MediaMetadata) -> f64 {
    if spec.kind == SlideKind::Template {
        return spec.template_width.unwrap_or(DEFAULT_TEMPLATE_WIDTH);
    }
    height * resolve_ratio(spec, metadata)
}

/// Build a [`FixedLayout`] for `specs` rendered at `height` with trailing `spacing`.
pub fn layout_from_specs(
    specs: &[SlideSpec],
    height: f64,
    spacing: f64,
    container_width: f64,
    metadata: &dyn MediaMetadata,
) -> FixedLayout {
    let widths = specs
        .iter()
        .map(|s| slide_width(s, height, metadata))
        .collect();
    FixedLayout::new(container_width, widths, spacing)
}

//! Slide position table and offset clamping.
//!
//! The host exposes the live layout through [`SlideLayout`]. Every recompute reads
//! all widths afresh (responsive breakpoints and late-loading images change them)
//! and produces a brand new [`GeometrySnapshot`]; snapshots are never patched in
//! place.

use serde::{Deserialize, Serialize};

/// Read-only view over the rendered container and its slides.
/// Adapters (WASM/native) implement this and hand it to the engine at construction.
pub trait SlideLayout {
    /// Current visible width of the container (viewport).
    fn container_width(&self) -> f64;
    /// Number of slides in document order.
    fn slide_count(&self) -> usize;
    /// Rendered width of slide `index` including its trailing spacing.
    fn slide_outer_width(&self, index: usize) -> f64;

    /// Called once at the start of every measurement pass, before any other method.
    /// Layouts backed by a live host refresh their cached reading here.
    fn refresh(&self) {}
}

/// Stock layout for hosts that know slide widths up front.
///
/// `slide_widths` are content widths; `spacing` is added after each slide, matching
/// a trailing `margin-right` on every slide element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedLayout {
    pub container_width: f64,
    pub slide_widths: Vec<f64>,
    #[serde(default)]
    pub spacing: f64,
}

impl FixedLayout {
    pub fn new(container_width: f64, slide_widths: Vec<f64>, spacing: f64) -> Self {
        Self {
            container_width,
            slide_widths,
            spacing,
        }
    }
}

impl SlideLayout for FixedLayout {
    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn slide_count(&self) -> usize {
        self.slide_widths.len()
    }

    fn slide_outer_width(&self, index: usize) -> f64 {
        self.slide_widths
            .get(index)
            .map(|w| w + self.spacing)
            .unwrap_or(0.0)
    }
}

/// One entry of the position table.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlidePosition {
    pub index: usize,
    /// Pixels from the start of the track.
    pub offset: f64,
    /// Visual width including trailing spacing.
    pub width: f64,
}

impl SlidePosition {
    /// Trailing edge of the slide on the track.
    #[inline]
    pub fn end(&self) -> f64 {
        self.offset + self.width
    }
}

/// Ordered position table plus the container width it was measured against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    pub positions: Vec<SlidePosition>,
    pub total_width: f64,
    pub container_width: f64,
}

impl GeometrySnapshot {
    /// Measure every slide in document order and build the cumulative table.
    pub fn measure(layout: &dyn SlideLayout) -> Self {
        layout.refresh();
        let count = layout.slide_count();
        let mut positions = Vec::with_capacity(count);
        let mut cumulative = 0.0;
        for index in 0..count {
            let width = sanitize(layout.slide_outer_width(index), "slide width", index);
            positions.push(SlidePosition {
                index,
                offset: cumulative,
                width,
            });
            cumulative += width;
        }
        let container_width = sanitize(layout.container_width(), "container width", 0);
        Self {
            positions,
            total_width: cumulative,
            container_width,
        }
    }

    /// Build a snapshot from already-measured outer widths.
    pub fn from_widths(widths: &[f64], container_width: f64) -> Self {
        let layout = FixedLayout::new(container_width, widths.to_vec(), 0.0);
        Self::measure(&layout)
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, index: usize) -> Option<&SlidePosition> {
        self.positions.get(index)
    }

    /// Largest committed offset: `max(0, total_width - container_width)`.
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.total_width - self.container_width).max(0.0)
    }

    /// Bound `offset` to `[0, max_offset]`.
    #[inline]
    pub fn clamp(&self, offset: f64) -> f64 {
        clamp(offset, self.total_width, self.container_width)
    }
}

/// `max(0, min(offset, max(0, total_width - container_width)))`.
#[inline]
pub fn clamp(offset: f64, total_width: f64, container_width: f64) -> f64 {
    let max = (total_width - container_width).max(0.0);
    offset.min(max).max(0.0)
}

fn sanitize(value: f64, what: &str, index: usize) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("ignoring invalid {what} {value} at index {index}; using 0");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_slides() -> GeometrySnapshot {
        GeometrySnapshot::measure(&FixedLayout::new(640.0, vec![300.0; 5], 20.0))
    }

    #[test]
    fn offsets_are_cumulative() {
        let g = five_slides();
        assert_eq!(g.slide_count(), 5);
        assert_eq!(g.positions[0].offset, 0.0);
        for pair in g.positions.windows(2) {
            assert!((pair[1].offset - (pair[0].offset + pair[0].width)).abs() < 1e-9);
        }
        assert_eq!(g.total_width, 1600.0);
        assert_eq!(g.max_offset(), 960.0);
    }

    #[test]
    fn empty_layout_has_zero_extent() {
        let g = GeometrySnapshot::measure(&FixedLayout::new(640.0, vec![], 20.0));
        assert!(g.is_empty());
        assert_eq!(g.total_width, 0.0);
        assert_eq!(g.max_offset(), 0.0);
        assert_eq!(g.clamp(120.0), 0.0);
    }

    #[test]
    fn clamp_bounds_both_ends() {
        assert_eq!(clamp(-10.0, 1000.0, 400.0), 0.0);
        assert_eq!(clamp(250.0, 1000.0, 400.0), 250.0);
        assert_eq!(clamp(900.0, 1000.0, 400.0), 600.0);
        // Track narrower than the container never scrolls.
        assert_eq!(clamp(50.0, 300.0, 400.0), 0.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        for x in [-500.0, -0.5, 0.0, 12.5, 600.0, 601.0, 1e9] {
            let once = clamp(x, 1000.0, 400.0);
            assert_eq!(clamp(once, 1000.0, 400.0), once);
        }
    }

    #[test]
    fn invalid_widths_are_treated_as_zero() {
        let layout = FixedLayout::new(f64::NAN, vec![100.0, -5.0, f64::INFINITY, 50.0], 0.0);
        let g = GeometrySnapshot::measure(&layout);
        assert_eq!(g.container_width, 0.0);
        assert_eq!(g.positions[1].width, 0.0);
        assert_eq!(g.positions[2].width, 0.0);
        assert_eq!(g.positions[3].offset, 100.0);
        assert_eq!(g.total_width, 150.0);
    }

    struct LiveLayout {
        reads: std::cell::Cell<u32>,
    }

    impl SlideLayout for LiveLayout {
        fn container_width(&self) -> f64 {
            500.0
        }
        fn slide_count(&self) -> usize {
            self.reads.get() as usize
        }
        fn slide_outer_width(&self, _index: usize) -> f64 {
            100.0
        }
        fn refresh(&self) {
            self.reads.set(self.reads.get() + 1);
        }
    }

    #[test]
    fn every_measure_refreshes_first() {
        let layout = LiveLayout {
            reads: std::cell::Cell::new(0),
        };
        assert_eq!(GeometrySnapshot::measure(&layout).slide_count(), 1);
        assert_eq!(GeometrySnapshot::measure(&layout).slide_count(), 2);
    }
}

//! Target-index rules for prev/next/go-to.
//!
//! These functions only decide *where* to go; the engine applies the result and
//! re-syncs the render state. Every function returns `None` when the request is
//! a no-op, so callers never mutate state on invalid input.

use crate::geometry::GeometrySnapshot;

/// Target of `go_to(index)`: valid only for `0 <= index < slide_count`.
pub fn go_to_target(geometry: &GeometrySnapshot, index: usize) -> Option<usize> {
    (index < geometry.slide_count()).then_some(index)
}

/// Target of `prev()`: one step back, wrapping to the last slide when looping.
pub fn prev_target(geometry: &GeometrySnapshot, current: usize, looping: bool) -> Option<usize> {
    let count = geometry.slide_count();
    if count == 0 || current >= count {
        return None;
    }
    if current > 0 {
        Some(current - 1)
    } else if looping {
        Some(count - 1)
    } else {
        None
    }
}

/// Target of `next()`: the first slide after `current` whose trailing edge does not
/// overflow the full track, wrapping to 0 when looping and none qualifies.
///
/// Widths are unequal, so this is not always `current + 1`; see [`next_fitting`].
pub fn next_target(geometry: &GeometrySnapshot, current: usize, looping: bool) -> Option<usize> {
    let count = geometry.slide_count();
    if count == 0 || current >= count {
        return None;
    }
    match next_fitting(geometry, current) {
        Some(j) => Some(j),
        None if looping => Some(0),
        None => None,
    }
}

/// Smallest `j > current` with `positions[j].offset + positions[j].width <= total_width`.
pub fn next_fitting(geometry: &GeometrySnapshot, current: usize) -> Option<usize> {
    geometry
        .positions
        .iter()
        .skip(current + 1)
        .find(|p| p.end() <= geometry.total_width)
        .map(|p| p.index)
}

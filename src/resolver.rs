//! Picks the current heading for a threshold.

use crate::geometry::Geometry;
use crate::heading::Heading;

#[must_use]
/// Measures every heading's top edge, in document order.
///
/// Returns `None` as soon as one heading can no longer be measured; a half-measured page is
/// treated as having no current heading rather than guessing.
pub fn measure(headings: &[Heading], geometry: &impl Geometry) -> Option<Vec<f64>> {
    headings
        .iter()
        .map(|heading| geometry.heading_top(&heading.id))
        .collect()
}

#[must_use]
/// Index of the current heading given each heading's top offset.
///
/// The current heading is the last one whose top sits at or above `threshold`. Offsets are in
/// document order and never decrease, so the scan stops at the first heading below the line.
/// When none qualifies the first heading is used, unless it is still below the viewport, in
/// which case the reader has not reached any heading yet.
pub fn resolve(tops: &[f64], threshold: f64, viewport_height: f64) -> Option<usize> {
    let last = tops.iter().take_while(|&&top| top <= threshold).count();
    match (last, tops.first()) {
        (0, Some(&first)) if first < viewport_height => Some(0),
        (0, _) => None,
        (n, _) => Some(n - 1),
    }
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;

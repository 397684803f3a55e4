//! Measurements consumed by the tracker and resolver.
//!
//! The widget does no layout of its own. Whatever renders the page answers these questions on
//! demand, in viewport-relative pixels, and the answers are treated as a snapshot valid only for
//! the current event.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Vertical extent of an element relative to the top of the viewport.
pub struct VerticalRect {
    /// Distance from the viewport top to the element's top edge.
    pub top: f64,
    /// Distance from the viewport top to the element's bottom edge.
    pub bottom: f64,
}

/// Live page geometry supplied by the host.
pub trait Geometry {
    /// Height of the visible area.
    fn viewport_height(&self) -> f64;

    /// Full scrollable height of the document.
    fn document_height(&self) -> f64;

    /// How far the document is scrolled from its top.
    fn scroll_top(&self) -> f64;

    /// Position of the heading with the given anchor id, or `None` if it is no longer present.
    fn heading_rect(&self, id: &str) -> Option<VerticalRect>;

    /// Top edge of a heading, relative to the viewport.
    fn heading_top(&self, id: &str) -> Option<f64> {
        self.heading_rect(id).map(|rect| rect.top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// The three numbers the threshold tracker needs from a scroll or resize tick.
pub struct ScrollMetrics {
    /// Current scroll offset.
    pub scroll_top: f64,
    /// Visible height.
    pub viewport_height: f64,
    /// Full document height.
    pub document_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    /// Samples the metrics from a geometry source.
    pub fn sample(geometry: &impl Geometry) -> Self {
        Self {
            scroll_top: geometry.scroll_top(),
            viewport_height: geometry.viewport_height(),
            document_height: geometry.document_height(),
        }
    }
}

/// Row-based geometry for text hosts, where every document line is one row of fixed height.
///
/// Heading positions are given as source rows; pixels are `rows * row_height`.
pub struct LineGeometry<'a> {
    /// Pixels per row.
    pub row_height: f64,
    /// Rows visible at once.
    pub viewport_rows: usize,
    /// Total rows in the document.
    pub document_rows: usize,
    /// First visible row.
    pub scroll_row: usize,
    /// Source row of each heading, keyed by anchor id.
    pub heading_rows: &'a HashMap<String, usize>,
}

#[allow(clippy::cast_precision_loss)]
impl LineGeometry<'_> {
    fn px(&self, rows: usize) -> f64 {
        rows as f64 * self.row_height
    }
}

#[allow(clippy::cast_precision_loss)]
impl Geometry for LineGeometry<'_> {
    fn viewport_height(&self) -> f64 {
        self.px(self.viewport_rows)
    }

    fn document_height(&self) -> f64 {
        self.px(self.document_rows)
    }

    fn scroll_top(&self) -> f64 {
        self.px(self.scroll_row)
    }

    fn heading_rect(&self, id: &str) -> Option<VerticalRect> {
        let row = *self.heading_rows.get(id)?;
        let top = (row as f64 - self.scroll_row as f64) * self.row_height;
        Some(VerticalRect {
            top,
            bottom: top + self.row_height,
        })
    }
}

#[cfg(test)]
#[path = "tests/geometry.rs"]
mod tests;

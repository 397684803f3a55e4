//! The adaptive decision line that decides which heading counts as "current".
//!
//! A fixed line flickers: during a fast scroll, headings cross it every frame. Instead the line
//! has two resting positions, a higher one while scrolling down and a lower one while scrolling
//! up, and it eases toward the active resting position by at most the distance scrolled. Near the
//! bottom of the page the resting position is pulled down toward the bottom of the viewport so
//! that the last headings can still become current; near the top it is pulled back up.
//!
//! ```text
//!  viewport top ─────────────────────────────
//!                 ── Tdown (resting, scrolling down)
//!                 ── Tup   (resting, scrolling up)
//!                 ── Tdown + bottomAdjust (at the end of the page)
//!  viewport bottom ──────────────────────────
//! ```

use crate::geometry::ScrollMetrics;

/// Decision line with directional hysteresis.
///
/// One tracker lives for one page view. It starts at the forward resting position with a last
/// known scroll position of zero.
#[derive(Clone, Debug)]
pub struct ThresholdTracker {
    down: f64,
    up: f64,
    value: f64,
    last_scroll: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Every intermediate quantity of one update, kept for the debug overlay.
pub struct ThresholdSnapshot {
    /// Full document height.
    pub document_height: f64,
    /// Visible height.
    pub viewport_height: f64,
    /// Scroll offset the update was computed for.
    pub scroll_top: f64,
    /// How far the forward resting line still reaches above the document top.
    pub pixels_above: f64,
    /// Document height remaining below the viewport.
    pub pixels_below: f64,
    /// Pull toward the viewport bottom as the page end approaches.
    pub bottom_adjust: f64,
    /// `bottom_adjust` after scaling for documents shorter than two viewports.
    pub adjusted_bottom_adjust: f64,
    /// Whether the update was treated as a downward scroll.
    pub scrolling_down: bool,
    /// The resulting threshold.
    pub threshold: f64,
}

impl ThresholdSnapshot {
    #[must_use]
    /// Label/value rows in display order, values to one decimal.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("documentHeight", format!("{:.1}", self.document_height)),
            ("windowHeight", format!("{:.1}", self.viewport_height)),
            ("scrollTop", format!("{:.1}", self.scroll_top)),
            ("pixelsAbove", format!("{:.1}", self.pixels_above)),
            ("pixelsBelow", format!("{:.1}", self.pixels_below)),
            ("bottomAdd", format!("{:.1}", self.bottom_adjust)),
            ("adjustedBottomAdd", format!("{:.1}", self.adjusted_bottom_adjust)),
            ("scrollingDown", self.scrolling_down.to_string()),
            ("threshold", format!("{:.1}", self.threshold)),
        ]
    }
}

impl ThresholdTracker {
    #[must_use]
    /// Creates a tracker resting at `down`, with `up` as the reverse resting position.
    pub fn new(down: f64, up: f64) -> Self {
        Self {
            down,
            up,
            value: down,
            last_scroll: 0.0,
        }
    }

    #[must_use]
    /// Current position of the decision line, in viewport pixels.
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    /// Scroll offset seen by the previous update.
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    /// Moves the line to an explicit position, as after a click on a sidebar entry.
    ///
    /// The last known scroll position is left alone, so the next update still measures its
    /// direction against the last tick the tracker actually saw.
    pub fn place(&mut self, value: f64) {
        self.value = value;
    }

    /// Recomputes the line for a scroll or resize tick.
    pub fn update(&mut self, metrics: ScrollMetrics) -> ThresholdSnapshot {
        let ScrollMetrics {
            scroll_top,
            viewport_height,
            document_height,
        } = metrics;

        let pixels_below = (document_height - (scroll_top + viewport_height)).max(0.0);
        let pixels_above = (self.down - scroll_top).max(0.0);
        let bottom_adjust = (viewport_height - pixels_below - self.down).max(0.0);

        // The pull assumes at least two viewports of document; shrink it for shorter pages.
        let mut adjusted_bottom_adjust = bottom_adjust;
        if document_height < viewport_height * 2.0 {
            let max_pixels_below = document_height - viewport_height;
            let t = 1.0 - pixels_below / max_pixels_below.max(1.0);
            adjusted_bottom_adjust *= t.clamp(0.0, 1.0);
        }

        let scrolling_down = scroll_top >= self.last_scroll;
        if scrolling_down {
            let scrolled = scroll_top - self.last_scroll;
            let resting = self.down + adjusted_bottom_adjust;
            self.value = resting.max(self.value - scrolled);
        } else {
            let scrolled = self.last_scroll - scroll_top;
            let resting =
                self.up - pixels_above + (adjusted_bottom_adjust - self.down).max(0.0);
            self.value = resting.min(self.value + scrolled);
        }

        if document_height <= viewport_height {
            self.value = 0.0;
        }

        self.last_scroll = scroll_top;

        ThresholdSnapshot {
            document_height,
            viewport_height,
            scroll_top,
            pixels_above,
            pixels_below,
            bottom_adjust,
            adjusted_bottom_adjust,
            scrolling_down,
            threshold: self.value,
        }
    }
}

#[cfg(test)]
#[path = "tests/threshold.rs"]
mod tests;

//! Per-page tracking context tying the outline, the threshold and click handling together.
//!
//! One navigator exists per page view and is discarded when the page changes, which gives every
//! page a fresh outline and a fresh threshold baseline. The host forwards its events here:
//!
//! - [`Navigator::reload`] on load, scroll and resize,
//! - [`Navigator::click`] when a heading entry in the sidebar is followed,
//! - [`Navigator::frame`] once per painted frame, to finish deferred click measurements,
//! - [`Navigator::toggle`] for fold toggles.
//!
//! All of it runs on the host's event thread; nothing here blocks or spawns.

use crate::config::Config;
use crate::geometry::{Geometry, ScrollMetrics};
use crate::heading::Heading;
use crate::interaction::{PendingSettle, QuietPeriod, QuietToken, SettleStrategy};
use crate::outline::{NodeId, Outline};
use crate::resolver;
use crate::threshold::{ThresholdSnapshot, ThresholdTracker};
use std::time::Instant;

/// Deepest heading level collected from a page.
pub const MAX_LEVEL: usize = 6;

/// Tracking state for one page view.
pub struct Navigator {
    headings: Vec<Heading>,
    outline: Outline,
    tracker: ThresholdTracker,
    quiet: QuietPeriod,
    quiet_token: Option<QuietToken>,
    settle: SettleStrategy,
    pending: Option<PendingSettle>,
    debug: bool,
    snapshot: Option<ThresholdSnapshot>,
}

impl Navigator {
    #[must_use]
    /// Builds the outline for a page's headings.
    ///
    /// Headings outside `min_level..=6` are dropped first. Returns `None` when nothing is left,
    /// in which case the page gets no outline and no tracking.
    pub fn new(headings: Vec<Heading>, config: &Config) -> Option<Self> {
        let headings: Vec<Heading> = headings
            .into_iter()
            .filter(|h| (config.min_level..=MAX_LEVEL).contains(&h.level))
            .collect();
        let outline = Outline::build(&headings, config.min_level, config.fold_level)?;
        tracing::debug!(
            headings = headings.len(),
            nodes = outline.len(),
            "built page outline"
        );

        Some(Self {
            headings,
            outline,
            tracker: ThresholdTracker::new(config.down_threshold, config.up_threshold),
            quiet: QuietPeriod::new(config.quiet_period()),
            quiet_token: None,
            settle: config.settle_strategy(),
            pending: None,
            debug: false,
            snapshot: None,
        })
    }

    #[must_use]
    /// Headings being tracked, in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    #[must_use]
    /// The outline shown in the sidebar.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// Current position of the decision line.
    pub fn threshold(&self) -> f64 {
        self.tracker.value()
    }

    #[must_use]
    /// The heading currently marked active.
    pub fn current(&self) -> Option<&Heading> {
        self.outline
            .active_heading()
            .and_then(|index| self.headings.get(index))
    }

    #[must_use]
    /// Whether scroll ticks are being ignored after a click.
    pub fn is_quiet(&self, now: Instant) -> bool {
        self.quiet.is_quiet(now)
    }

    /// Handles a load, scroll or resize tick.
    ///
    /// Ignored while a click's quiet period is running. Returns whether anything was recomputed.
    pub fn reload(&mut self, geometry: &impl Geometry, now: Instant) -> bool {
        if self.quiet.is_quiet(now) {
            return false;
        }
        self.snapshot = Some(self.tracker.update(ScrollMetrics::sample(geometry)));
        self.update_current(geometry);
        true
    }

    /// Re-resolves the active heading against the current threshold without moving it.
    pub fn update_current(&mut self, geometry: &impl Geometry) {
        let current = resolver::measure(&self.headings, geometry).and_then(|tops| {
            resolver::resolve(&tops, self.tracker.value(), geometry.viewport_height())
        });

        match current.and_then(|index| self.outline.node_for_heading(index)) {
            Some(node) => self.outline.set_active(node),
            None => {
                if self.outline.active().is_some() {
                    tracing::debug!("no current heading at threshold {}", self.tracker.value());
                }
                self.outline.clear_active();
            }
        }
    }

    /// Handles the reader following the sidebar entry for heading `id`.
    ///
    /// Mutes scroll ticks for the quiet period, then places the threshold at the heading once the
    /// jump has settled. A second click before that replaces the first. A deferred placement ends
    /// the quiet period early, since the jump it was muting is over by then.
    pub fn click(&mut self, id: &str, geometry: &impl Geometry, now: Instant) {
        self.quiet_token = Some(self.quiet.start(now));
        if self.settle == SettleStrategy::Immediate {
            self.pending = None;
            self.place_at(id, geometry);
        } else {
            self.pending = Some(PendingSettle::new(id, self.settle, now));
        }
    }

    /// Advances a pending click by one painted frame.
    pub fn frame(&mut self, geometry: &impl Geometry, now: Instant) {
        let ready = self
            .pending
            .as_mut()
            .is_some_and(|pending| pending.poll(now));
        if !ready {
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.place_at(&pending.target, geometry);
            if let Some(token) = self.quiet_token.take() {
                self.quiet.cancel(token);
            }
        }
    }

    fn place_at(&mut self, id: &str, geometry: &impl Geometry) {
        let Some(rect) = geometry.heading_rect(id) else {
            tracing::debug!(id, "clicked heading is not on the page, leaving threshold alone");
            return;
        };
        self.tracker.place(rect.bottom);
        self.update_current(geometry);
    }

    /// Flips the fold state of an outline node. The active mark is unaffected.
    pub fn toggle(&mut self, node: NodeId) -> bool {
        self.outline.toggle(node)
    }

    /// Starts exposing the threshold internals for the debug overlay.
    pub fn enable_threshold_debug(&mut self, geometry: &impl Geometry) {
        self.debug = true;
        self.snapshot = Some(self.tracker.update(ScrollMetrics::sample(geometry)));
        tracing::info!(threshold = self.tracker.value(), "threshold debugging enabled");
    }

    #[must_use]
    /// Latest tracker internals, once debugging is enabled.
    pub fn debug_snapshot(&self) -> Option<ThresholdSnapshot> {
        if self.debug {
            self.snapshot.map(|snapshot| ThresholdSnapshot {
                threshold: self.tracker.value(),
                ..snapshot
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/navigator.rs"]
mod tests;

//! Timing and scroll-continuity pieces of the sidebar's click handling.
//!
//! A click on a heading entry makes the host jump to the anchor, which fires a burst of scroll
//! events. Those must not drag the threshold back to where scrolling alone would put it, so the
//! click opens a quiet period during which scroll-driven recomputation is skipped. The click's own
//! measurement waits for the jump to settle, using one of the [`SettleStrategy`] variants.
//!
//! Separately, clicking any sidebar link remembers where that link sat inside the sidebar, so the
//! next page can put its active entry back at the same spot instead of jumping the sidebar around.

use crate::geometry::VerticalRect;
use crate::store::Store;
use std::time::{Duration, Instant};

/// Store key holding the clicked link's offset from the sidebar top.
pub const SIDEBAR_SCROLL_KEY: &str = "sidebar-scroll-offset";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Handle to one started quiet period.
pub struct QuietToken(u64);

#[derive(Clone, Debug)]
/// Window after a click during which scroll ticks are ignored.
///
/// Starting a new period supersedes the old one: the deadline moves and earlier tokens can no
/// longer cancel it.
pub struct QuietPeriod {
    duration: Duration,
    until: Option<Instant>,
    generation: u64,
}

impl QuietPeriod {
    #[must_use]
    /// Creates an idle quiet period of the given length.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            until: None,
            generation: 0,
        }
    }

    /// Starts (or restarts) the period at `now`.
    pub fn start(&mut self, now: Instant) -> QuietToken {
        self.generation += 1;
        self.until = Some(now + self.duration);
        QuietToken(self.generation)
    }

    #[must_use]
    /// Whether scroll ticks should be ignored at `now`.
    pub fn is_quiet(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Ends the period early, if `token` belongs to the latest start.
    pub fn cancel(&mut self, token: QuietToken) -> bool {
        if token.0 == self.generation && self.until.is_some() {
            self.until = None;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// When to measure a clicked heading after the host starts scrolling to it.
pub enum SettleStrategy {
    /// Measure during the click itself.
    Immediate,
    /// Measure after this many painted frames.
    Frames(u32),
    /// Measure once this much time has passed.
    Delay(Duration),
}

#[derive(Clone, Debug)]
/// A click waiting for the scroll it caused to settle.
pub struct PendingSettle {
    /// Anchor id of the clicked heading.
    pub target: String,
    remaining_frames: u32,
    due: Option<Instant>,
}

impl PendingSettle {
    #[must_use]
    /// Schedules a measurement of `target` according to `strategy`.
    pub fn new(target: impl Into<String>, strategy: SettleStrategy, now: Instant) -> Self {
        let (remaining_frames, due) = match strategy {
            SettleStrategy::Immediate => (0, None),
            SettleStrategy::Frames(n) => (n, None),
            SettleStrategy::Delay(delay) => (0, Some(now + delay)),
        };
        Self {
            target: target.into(),
            remaining_frames,
            due,
        }
    }

    /// Records one painted frame at `now` and reports whether the target can be measured.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(due) = self.due {
            return now >= due;
        }
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        self.remaining_frames == 0
    }
}

/// Remembers where a clicked sidebar link sat relative to the sidebar's top edge.
pub fn remember_link_offset<S: Store + ?Sized>(store: &mut S, link_top: f64, sidebar_top: f64) {
    store.set(SIDEBAR_SCROLL_KEY, (link_top - sidebar_top).to_string());
}

/// Computes the sidebar scroll position for a freshly loaded page.
///
/// The remembered offset is consumed whether or not it is used. With an offset, the sidebar
/// shifts so the active entry sits where the clicked link was; without one, the active entry is
/// centred. `active` is relative to the sidebar's top edge at scroll position `scroll`.
pub fn restore_sidebar_scroll<S: Store + ?Sized>(
    store: &mut S,
    active: Option<VerticalRect>,
    scroll: f64,
    sidebar_height: f64,
) -> f64 {
    let remembered = store
        .take(SIDEBAR_SCROLL_KEY)
        .and_then(|value| value.parse::<f64>().ok());

    let Some(active) = active else {
        return scroll;
    };

    let restored = match remembered {
        Some(offset) => scroll + (active.top - offset),
        None => scroll + (active.top + active.bottom) / 2.0 - sidebar_height / 2.0,
    };
    restored.max(0.0)
}

#[cfg(test)]
#[path = "tests/interaction.rs"]
mod tests;

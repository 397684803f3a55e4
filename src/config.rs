//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a waymark.toml, and if present we load settings from there.
//! This provides the threshold tuning, fold depth, click timing and file extension preferences.

use crate::interaction::SettleStrategy;
use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Facet, Clone, Debug, PartialEq)]
/// Preferences loaded from waymark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 150.0)]
    /// Resting threshold while scrolling down, in pixels from the viewport top.
    pub down_threshold: f64,
    #[facet(default = 300.0)]
    /// Resting threshold while scrolling up.
    pub up_threshold: f64,
    #[facet(default = 3)]
    /// Heading level from which outline groups start collapsed and foldable.
    pub fold_level: usize,
    #[facet(default = 2)]
    /// Outermost heading level tracked; shallower headings are page titles.
    pub min_level: usize,
    #[facet(default = 100)]
    /// How long scroll ticks are ignored after a sidebar click, in milliseconds.
    pub quiet_period_ms: u64,
    #[facet(default = 2)]
    /// Frames to wait before measuring a clicked heading.
    pub settle_frames: u32,
    #[facet(default = 0)]
    /// Fixed wait before measuring a clicked heading; overrides `settle_frames` when non-zero.
    pub settle_delay_ms: u64,
    #[facet(default = 20.0)]
    /// Pixels per text row when measuring a terminal document.
    pub row_height: f64,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = String::new())]
    /// JSON file carrying session state between runs; empty keeps it in memory.
    pub state_file: String,
}

impl Default for Config {
    fn default() -> Self {
        facet_toml::from_str::<Self>("").unwrap_or_else(|e| {
            tracing::warn!("field defaults failed to apply, using built-in values: {e}");
            Self::fallback()
        })
    }
}

impl Config {
    #[must_use]
    /// Load configuration from waymark.toml if present.
    pub fn load() -> Self {
        Self::from_path(Path::new("waymark.toml")).unwrap_or_default()
    }

    #[must_use]
    /// Load configuration from a specific file, `None` if it is missing or invalid.
    pub fn from_path(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid config: {e}");
                None
            }
        }
    }

    fn fallback() -> Self {
        Self {
            down_threshold: 150.0,
            up_threshold: 300.0,
            fold_level: 3,
            min_level: 2,
            quiet_period_ms: 100,
            settle_frames: 2,
            settle_delay_ms: 0,
            row_height: 20.0,
            file_extensions: vec!["md".to_string()],
            state_file: String::new(),
        }
    }

    #[must_use]
    /// Quiet period after a sidebar click.
    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    #[must_use]
    /// How clicked headings are measured once the host scrolls to them.
    pub fn settle_strategy(&self) -> SettleStrategy {
        match (self.settle_delay_ms, self.settle_frames) {
            (0, 0) => SettleStrategy::Immediate,
            (0, frames) => SettleStrategy::Frames(frames),
            (delay, _) => SettleStrategy::Delay(Duration::from_millis(delay)),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

//! waymark: an "on this page" sidebar that follows the reader through a long document.
//!
//! Headings are discovered once per page, folded into a nested outline, and spliced into a
//! static chapter list after the active chapter. As the reader scrolls, a single decision line
//! (the threshold) drifts between a forward and a reverse resting position, and the last heading
//! whose top sits above that line becomes the current one.
//!
//! The widget never measures anything itself. Hosts hand it numbers through [`geometry::Geometry`]
//! and a key/value [`store::Store`], which keeps the tracking logic testable without a renderer.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod chapters;
pub mod config;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod heading;
pub mod input;
pub mod interaction;
pub mod navigator;
pub mod outline;
pub mod resolver;
pub mod sidebar;
pub mod store;
pub mod threshold;
pub mod ui;

pub use error::{Error, Result};

//! Heading representation for documents discovered on a page.
//!
//! A heading is a titled landmark at some nesting depth. It doubles as the scroll anchor the
//! reader jumps to and the label shown in the sidebar. Vertical position is deliberately absent:
//! it changes with every scroll and is always asked of the geometry source at the moment of use.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Document landmark collected once per page load, in document order.
pub struct Heading {
    /// Anchor identity, unique within the page.
    pub id: String,
    /// Nesting depth (1 for the page title, 2 for top-level sections).
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Zero-based source line the heading starts on.
    pub line: usize,
}

impl Heading {
    #[must_use]
    /// Creates a heading from its parts.
    pub fn new(id: impl Into<String>, level: usize, title: impl Into<String>, line: usize) -> Self {
        Self {
            id: id.into(),
            level,
            title: title.into(),
            line,
        }
    }
}

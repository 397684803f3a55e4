//! The sidebar for one page: the chapter list with the page outline spliced in.
//!
//! [`Sidebar::initialize`] is the one-shot entry point run when a page loads. It finds the
//! chapter for the page, reveals it, and builds the outline that is shown directly under it.
//! A page that is not in the chapter list, or that has no headings, gets the chapter list alone.

use crate::chapters::ChapterList;
use crate::config::Config;
use crate::heading::Heading;
use crate::navigator::Navigator;
use crate::outline::NodeId;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One drawable line of the sidebar.
pub enum SidebarRow {
    /// A chapter entry.
    Chapter {
        /// Index into the chapter list.
        index: usize,
        /// Indentation depth.
        depth: usize,
    },
    /// A heading of the current page.
    Heading {
        /// Outline node of the heading.
        node: NodeId,
        /// Indentation depth.
        depth: usize,
    },
}

impl SidebarRow {
    #[must_use]
    /// Indentation depth of the row.
    pub fn depth(&self) -> usize {
        match *self {
            Self::Chapter { depth, .. } | Self::Heading { depth, .. } => depth,
        }
    }
}

/// Chapter list plus the tracking context of the current page.
pub struct Sidebar {
    chapters: ChapterList,
    active_chapter: Option<usize>,
    navigator: Option<Navigator>,
}

impl Sidebar {
    #[must_use]
    /// Sets up the sidebar for the page at `current_page`.
    pub fn initialize(
        mut chapters: ChapterList,
        current_page: &Path,
        headings: Vec<Heading>,
        config: &Config,
    ) -> Self {
        let active_chapter = chapters.active_index(current_page);
        let navigator = match active_chapter {
            Some(index) => {
                chapters.reveal(index);
                let navigator = Navigator::new(headings, config);
                if navigator.is_none() {
                    tracing::debug!(page = %current_page.display(), "no headings to track");
                }
                navigator
            }
            None => {
                tracing::debug!(
                    page = %current_page.display(),
                    "page is not in the chapter list, heading tracking disabled"
                );
                None
            }
        };
        tracing::info!(
            page = %current_page.display(),
            tracking = navigator.is_some(),
            "sidebar initialised"
        );

        Self {
            chapters,
            active_chapter,
            navigator,
        }
    }

    #[must_use]
    /// The chapter list.
    pub fn chapters(&self) -> &ChapterList {
        &self.chapters
    }

    #[must_use]
    /// Chapter of the page being viewed.
    pub fn active_chapter(&self) -> Option<usize> {
        self.active_chapter
    }

    #[must_use]
    /// Tracking context, present when the page has headings and a chapter entry.
    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    /// Mutable tracking context.
    pub fn navigator_mut(&mut self) -> Option<&mut Navigator> {
        self.navigator.as_mut()
    }

    #[must_use]
    /// Every row currently shown, top to bottom.
    pub fn rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        for index in self.chapters.visible() {
            let depth = self.chapters.chapters()[index].depth;
            rows.push(SidebarRow::Chapter { index, depth });

            if Some(index) != self.active_chapter {
                continue;
            }
            if let Some(navigator) = &self.navigator {
                rows.extend(navigator.outline().visible_rows().into_iter().map(|row| {
                    SidebarRow::Heading {
                        node: row.node,
                        depth: depth + 1 + row.depth,
                    }
                }));
            }
        }
        rows
    }

    #[must_use]
    /// Position of the active chapter among the shown rows.
    pub fn active_row(&self) -> Option<usize> {
        let active = self.active_chapter?;
        self.rows()
            .iter()
            .position(|row| matches!(row, SidebarRow::Chapter { index, .. } if *index == active))
    }

    #[must_use]
    /// Position of the current heading among the shown rows.
    pub fn current_heading_row(&self) -> Option<usize> {
        let active = self.navigator.as_ref()?.outline().active()?;
        self.rows()
            .iter()
            .position(|row| matches!(row, SidebarRow::Heading { node, .. } if *node == active))
    }

    /// Folds or unfolds the entry behind a row. Returns whether anything changed.
    pub fn toggle(&mut self, row: SidebarRow) -> bool {
        match row {
            SidebarRow::Chapter { index, .. } => self.chapters.toggle(index),
            SidebarRow::Heading { node, .. } => self
                .navigator
                .as_mut()
                .is_some_and(|navigator| navigator.toggle(node)),
        }
    }
}

#[cfg(test)]
#[path = "tests/sidebar.rs"]
mod tests;

//! The terminal host: one document on screen, its sidebar, and the events between them.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls and clicks. Every page load rebuilds the sidebar from the chapter list, which gives the
//! page a fresh outline and a fresh threshold, and the session store carries the sidebar's scroll
//! position from the old page to the new one.

use crate::chapters::ChapterList;
use crate::config::Config;
use crate::error::Result;
use crate::formats::markdown::MarkdownFormat;
use crate::geometry::{LineGeometry, VerticalRect};
use crate::input;
use crate::interaction;
use crate::sidebar::{Sidebar, SidebarRow};
use crate::store::Store;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Which pane receives movement keys.
pub enum Focus {
    /// Movement keys scroll the document.
    Document,
    /// Movement keys move the sidebar selection.
    Sidebar,
}

#[derive(Default)]
/// The document currently on screen.
pub struct Page {
    /// Location of the document.
    pub path: PathBuf,
    /// Document text, one entry per row.
    pub lines: Vec<String>,
    /// Row of each heading, keyed by anchor id.
    pub heading_rows: HashMap<String, usize>,
    /// First visible row.
    pub scroll_row: usize,
    /// Rows visible in the document pane.
    pub viewport_rows: usize,
    /// Pixels per row.
    pub row_height: f64,
}

impl Page {
    #[must_use]
    /// Geometry of the page as currently scrolled.
    pub fn geometry(&self) -> LineGeometry<'_> {
        LineGeometry {
            row_height: self.row_height,
            viewport_rows: self.viewport_rows,
            document_rows: self.lines.len(),
            scroll_row: self.scroll_row,
            heading_rows: &self.heading_rows,
        }
    }

    #[must_use]
    /// Furthest the page can scroll.
    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.viewport_rows)
    }
}

/// Bridges the page, its sidebar and the session store.
pub struct AppState {
    /// Documents of the book, in chapter order.
    pub files: Vec<PathBuf>,
    /// Chapter of the page on screen.
    pub current_file_index: usize,
    /// The page on screen.
    pub page: Page,
    /// Sidebar for the page on screen.
    pub sidebar: Sidebar,
    /// Selected sidebar row.
    pub sidebar_selection: usize,
    /// First visible sidebar row.
    pub sidebar_scroll: usize,
    /// Rows visible in the sidebar pane.
    pub sidebar_height: usize,
    /// Pane receiving movement keys.
    pub focus: Focus,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Active preferences.
    pub config: Config,
    chapters: ChapterList,
    store: Box<dyn Store>,
    debug_threshold: bool,
}

impl AppState {
    #[must_use]
    /// Creates the host state. No page is loaded until [`AppState::open_page`].
    pub fn new(chapters: ChapterList, config: Config, store: Box<dyn Store>) -> Self {
        let files = chapters
            .chapters()
            .iter()
            .map(|chapter| chapter.path.clone())
            .collect();
        let sidebar = Sidebar::initialize(
            chapters.clone(),
            &PathBuf::new(),
            Vec::new(),
            &config,
        );
        Self {
            files,
            current_file_index: 0,
            page: Page {
                row_height: config.row_height,
                ..Page::default()
            },
            sidebar,
            sidebar_selection: 0,
            sidebar_scroll: 0,
            sidebar_height: 0,
            focus: Focus::Document,
            message: None,
            config,
            chapters,
            store,
            debug_threshold: false,
        }
    }

    /// Loads the chapter at `index` as a new page.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn open_page(&mut self, index: usize, now: Instant) -> Result<()> {
        let Some(path) = self.files.get(index).cloned() else {
            return Ok(());
        };
        let (text, headings) = input::load_document(&path, &MarkdownFormat)?;

        self.current_file_index = index;
        self.page.lines = text.lines().map(str::to_string).collect();
        self.page.heading_rows = headings
            .iter()
            .map(|heading| (heading.id.clone(), heading.line))
            .collect();
        self.page.scroll_row = 0;
        self.page.path.clone_from(&path);

        self.sidebar = Sidebar::initialize(self.chapters.clone(), &path, headings, &self.config);
        let geometry = self.page.geometry();
        if let Some(navigator) = self.sidebar.navigator_mut() {
            if self.debug_threshold {
                navigator.enable_threshold_debug(&geometry);
            }
            navigator.reload(&geometry, now);
        }

        self.restore_sidebar_scroll();
        self.sidebar_selection = self.sidebar.active_row().unwrap_or(0);
        Ok(())
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn restore_sidebar_scroll(&mut self) {
        self.sidebar_scroll = 0;
        let active = self.sidebar.active_row().map(|row| VerticalRect {
            top: row as f64,
            bottom: row as f64 + 1.0,
        });
        let scroll = interaction::restore_sidebar_scroll(
            self.store.as_mut(),
            active,
            0.0,
            self.sidebar_height as f64,
        );
        self.sidebar_scroll = (scroll.round() as usize).min(self.max_sidebar_scroll());
    }

    fn max_sidebar_scroll(&self) -> usize {
        self.sidebar.rows().len().saturating_sub(self.sidebar_height)
    }

    /// Records new pane sizes, treating a change as a resize tick.
    pub fn set_viewport(&mut self, document_rows: usize, sidebar_rows: usize, now: Instant) {
        let changed = document_rows != self.page.viewport_rows;
        self.page.viewport_rows = document_rows;
        self.sidebar_height = sidebar_rows;
        if changed {
            self.page.scroll_row = self.page.scroll_row.min(self.page.max_scroll());
            self.on_scroll(now);
        }
    }

    /// Forwards a scroll or resize tick to the tracker.
    pub fn on_scroll(&mut self, now: Instant) {
        let geometry = self.page.geometry();
        if let Some(navigator) = self.sidebar.navigator_mut() {
            navigator.reload(&geometry, now);
        }
    }

    /// Advances deferred work by one painted frame.
    pub fn frame(&mut self, now: Instant) {
        let geometry = self.page.geometry();
        if let Some(navigator) = self.sidebar.navigator_mut() {
            navigator.frame(&geometry, now);
        }
    }

    /// Scrolls the document to `row`, clamped to the page.
    pub fn scroll_to(&mut self, row: usize, now: Instant) {
        let row = row.min(self.page.max_scroll());
        if row != self.page.scroll_row {
            self.page.scroll_row = row;
            self.on_scroll(now);
        }
    }

    /// Scrolls the document by `delta` rows.
    pub fn scroll_by(&mut self, delta: isize, now: Instant) {
        let row = self.page.scroll_row.saturating_add_signed(delta);
        self.scroll_to(row, now);
    }

    /// Moves the sidebar selection by `delta` rows, keeping it on screen.
    pub fn move_selection(&mut self, delta: isize) {
        let count = self.sidebar.rows().len();
        if count == 0 {
            return;
        }
        self.sidebar_selection = self
            .sidebar_selection
            .saturating_add_signed(delta)
            .min(count - 1);

        if self.sidebar_selection < self.sidebar_scroll {
            self.sidebar_scroll = self.sidebar_selection;
        } else if self.sidebar_height > 0
            && self.sidebar_selection >= self.sidebar_scroll + self.sidebar_height
        {
            self.sidebar_scroll = self.sidebar_selection + 1 - self.sidebar_height;
        }
    }

    #[must_use]
    /// The sidebar row under the selection.
    pub fn selected_row(&self) -> Option<SidebarRow> {
        self.sidebar.rows().get(self.sidebar_selection).copied()
    }

    /// Follows the selected sidebar entry.
    ///
    /// A heading entry jumps the document so the heading sits at the top and registers a click
    /// with the tracker; a chapter entry loads that chapter as a new page.
    ///
    /// # Errors
    ///
    /// Returns an error if a chapter's document cannot be loaded.
    #[allow(clippy::cast_precision_loss)]
    pub fn follow_selection(&mut self, now: Instant) -> Result<()> {
        let Some(row) = self.selected_row() else {
            return Ok(());
        };

        let link_top = self.sidebar_selection.saturating_sub(self.sidebar_scroll) as f64;
        interaction::remember_link_offset(self.store.as_mut(), link_top, 0.0);

        match row {
            SidebarRow::Chapter { index, .. } => self.open_page(index, now),
            SidebarRow::Heading { node, .. } => {
                let Some(navigator) = self.sidebar.navigator() else {
                    return Ok(());
                };
                let Some(id) = navigator
                    .outline()
                    .node(node)
                    .and_then(|n| n.heading)
                    .and_then(|index| navigator.headings().get(index))
                    .map(|heading| heading.id.clone())
                else {
                    return Ok(());
                };

                if let Some(&target) = self.page.heading_rows.get(&id) {
                    self.page.scroll_row = target.min(self.page.max_scroll());
                } else {
                    self.message = Some(format!("No anchor #{id} on this page"));
                }

                let geometry = self.page.geometry();
                if let Some(navigator) = self.sidebar.navigator_mut() {
                    navigator.click(&id, &geometry, now);
                }
                self.on_scroll(now);
                Ok(())
            }
        }
    }

    /// Folds or unfolds the selected sidebar entry.
    pub fn toggle_selection(&mut self) -> bool {
        let Some(row) = self.selected_row() else {
            return false;
        };
        let toggled = self.sidebar.toggle(row);
        let count = self.sidebar.rows().len();
        if count > 0 && self.sidebar_selection >= count {
            self.sidebar_selection = count - 1;
        }
        toggled
    }

    /// Turns on the threshold overlay for this and every later page.
    pub fn enable_threshold_debug(&mut self) {
        self.debug_threshold = true;
        let geometry = self.page.geometry();
        if let Some(navigator) = self.sidebar.navigator_mut() {
            navigator.enable_threshold_debug(&geometry);
        }
    }

    /// Switches keyboard focus between the panes.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Document => Focus::Sidebar,
            Focus::Sidebar => Focus::Document,
        };
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;

//! The static chapter list the page outline is spliced into.
//!
//! Chapters are the documents of a book in reading order, each tagged with a depth taken from its
//! directory nesting. A directory's `index.md` or `README.md` stands for the directory itself and
//! sits one level shallower than its siblings.

use std::path::{Path, PathBuf};

const INDEX_NAMES: [&str; 2] = ["index.md", "README.md"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One document in the chapter list.
pub struct Chapter {
    /// Label shown in the sidebar.
    pub title: String,
    /// Location of the document.
    pub path: PathBuf,
    /// Nesting depth within the book.
    pub depth: usize,
    /// Whether deeper chapters that follow are shown.
    pub expanded: bool,
}

#[derive(Clone, Debug, Default)]
/// Chapters in reading order.
pub struct ChapterList {
    chapters: Vec<Chapter>,
    base: PathBuf,
}

fn is_index(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| INDEX_NAMES.contains(&name))
}

/// Position of a document in reading order: an index page stands in for its directory, so it
/// comes before the files it introduces and otherwise keeps file-name order.
fn reading_key(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if is_index(path) => parent,
        _ => path,
    }
}

fn common_base(paths: &[&Path]) -> PathBuf {
    let mut parents = paths.iter().map(|p| p.parent().unwrap_or(Path::new("")));
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };
    parents.fold(first.to_path_buf(), |base, parent| {
        base.components()
            .zip(parent.components())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect()
    })
}

impl ChapterList {
    #[must_use]
    /// Builds the list from `(path, title)` pairs, deriving depth from the directory layout.
    pub fn from_documents(documents: Vec<(PathBuf, String)>) -> Self {
        let paths: Vec<&Path> = documents.iter().map(|(path, _)| path.as_path()).collect();
        let base = common_base(&paths);

        let mut chapters: Vec<Chapter> = documents
            .into_iter()
            .map(|(path, title)| {
                let nesting = path
                    .parent()
                    .and_then(|parent| parent.strip_prefix(&base).ok())
                    .map_or(0, |rel| rel.components().count());
                let depth = if is_index(&path) {
                    nesting.saturating_sub(1)
                } else {
                    nesting
                };
                Chapter {
                    title,
                    path,
                    depth,
                    expanded: true,
                }
            })
            .collect();

        chapters.sort_by(|a, b| {
            reading_key(&a.path)
                .cmp(reading_key(&b.path))
                .then_with(|| a.path.cmp(&b.path))
        });

        Self { chapters, base }
    }

    #[must_use]
    /// Builds the list from ready-made chapters.
    pub fn new(chapters: Vec<Chapter>) -> Self {
        let paths: Vec<&Path> = chapters.iter().map(|c| c.path.as_path()).collect();
        let base = common_base(&paths);
        Self { chapters, base }
    }

    #[must_use]
    /// All chapters in order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    /// Looks up a chapter.
    pub fn get(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    #[must_use]
    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    #[must_use]
    /// Whether the book has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    #[must_use]
    /// Index of the chapter for the page being viewed.
    ///
    /// An index page at the root of the book that is not itself listed aliases the first
    /// chapter.
    pub fn active_index(&self, current: &Path) -> Option<usize> {
        if let Some(index) = self.chapters.iter().position(|c| c.path == current) {
            return Some(index);
        }
        let at_root = current.parent().is_some_and(|parent| parent == self.base);
        if at_root && is_index(current) && !self.chapters.is_empty() {
            return Some(0);
        }
        None
    }

    #[must_use]
    /// Whether the chapter at `index` has deeper chapters directly after it.
    pub fn is_foldable(&self, index: usize) -> bool {
        match (self.chapters.get(index), self.chapters.get(index + 1)) {
            (Some(chapter), Some(next)) => next.depth > chapter.depth,
            _ => false,
        }
    }

    /// Expands the chapter at `index` and every chapter containing it.
    pub fn reveal(&mut self, index: usize) {
        let Some(chapter) = self.chapters.get_mut(index) else {
            return;
        };
        chapter.expanded = true;
        let mut depth = chapter.depth;
        for chapter in self.chapters[..index].iter_mut().rev() {
            if depth == 0 {
                break;
            }
            if chapter.depth < depth {
                chapter.expanded = true;
                depth = chapter.depth;
            }
        }
    }

    /// Folds or unfolds a chapter. Returns whether anything changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.is_foldable(index) {
            return false;
        }
        let chapter = &mut self.chapters[index];
        chapter.expanded = !chapter.expanded;
        true
    }

    #[must_use]
    /// Indices of chapters not hidden inside a folded chapter.
    pub fn visible(&self) -> Vec<usize> {
        let mut visible = Vec::new();
        let mut hidden_below: Option<usize> = None;
        for (index, chapter) in self.chapters.iter().enumerate() {
            if let Some(depth) = hidden_below {
                if chapter.depth > depth {
                    continue;
                }
                hidden_below = None;
            }
            visible.push(index);
            if !chapter.expanded && self.is_foldable(index) {
                hidden_below = Some(chapter.depth);
            }
        }
        visible
    }
}

#[cfg(test)]
#[path = "tests/chapters.rs"]
mod tests;

//! Document discovery and heading extraction.
//!
//! Documents are found by walking the given paths for matching extensions. Each document is
//! parsed with the format's grammar and every heading node becomes a [`Heading`] with an anchor
//! id derived from its label, made unique within the page by a numeric suffix.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::heading::Heading;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};
use walkdir::WalkDir;

/// Collects documents under the given paths whose extension is one of `extensions`.
///
/// Files named directly are kept regardless of extension. Directories are walked in file-name
/// order so that the resulting chapter list is stable between runs.
///
/// # Errors
///
/// Returns an error if a directory cannot be walked.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_file() {
            documents.push(path);
            continue;
        }

        for entry in WalkDir::new(&path).sort_by_file_name() {
            let entry = entry.map_err(|source| Error::Walk {
                path: path.clone(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext));
            if matches {
                documents.push(entry.into_path());
            }
        }
    }

    Ok(documents)
}

/// Parses `source` and returns every heading in document order, ids included.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query does not compile, or the parser
/// gives up on the document.
pub fn extract_headings(source: &str, format: &impl Format) -> Result<Vec<Heading>> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("document".to_string()))?;

    let query = Query::new(&language, format.heading_query())?;
    let Some(heading_capture) = query.capture_index_for_name("heading") else {
        return Ok(Vec::new());
    };

    let mut ids = IdAllocator::default();
    let mut headings = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    while let Some(m) = matches.next() {
        for capture in m.captures.iter().filter(|c| c.index == heading_capture) {
            let node = capture.node;
            let (Some(level), Some(title)) = (
                format.heading_level(node),
                format.heading_title(node, source),
            ) else {
                continue;
            };
            let id = ids.allocate(&title);
            headings.push(Heading::new(id, level, title, node.start_position().row));
        }
    }

    Ok(headings)
}

/// Reads a document from disk and extracts its headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path, format: &impl Format) -> Result<(String, Vec<Heading>)> {
    let text = std::fs::read_to_string(path)?;
    let headings = extract_headings(&text, format).map_err(|e| match e {
        Error::Parse(_) => Error::Parse(path.display().to_string()),
        other => other,
    })?;
    Ok((text, headings))
}

#[must_use]
/// Chapter label for a document: its first level-1 heading, else the file stem.
pub fn page_title(path: &Path, headings: &[Heading]) -> String {
    headings
        .iter()
        .find(|h| h.level == 1)
        .map(|h| h.title.clone())
        .or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
        })
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Default)]
/// Hands out slug ids, suffixing repeats with `-1`, `-2`, ...
///
/// A suffixed id can collide with a later heading whose own slug already ends in a number, so
/// every candidate is checked against the ids issued so far.
struct IdAllocator {
    issued: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl IdAllocator {
    fn allocate(&mut self, title: &str) -> String {
        let base = match slug::slugify(title) {
            s if s.is_empty() => "section".to_string(),
            s => s,
        };
        let mut id = base.clone();
        if self.issued.contains(&id) {
            let suffix = self.next_suffix.entry(base.clone()).or_insert(1);
            loop {
                id = format!("{base}-{suffix}");
                *suffix += 1;
                if !self.issued.contains(&id) {
                    break;
                }
            }
        }
        self.issued.insert(id.clone());
        id
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;

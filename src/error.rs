//! Errors surfaced while loading documents and session state.
//!
//! Tracking itself never fails: missing geometry, absent anchors and empty pages all degrade to
//! doing nothing. Only the I/O edges of the crate produce these.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while discovering documents, extracting headings or loading stored state.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking a directory tree failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Root that was being walked.
        path: PathBuf,
        /// Underlying walker error.
        source: walkdir::Error,
    },

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("grammar rejected by parser: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A heading query failed to compile against the grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser returned no tree for a document.
    #[error("failed to parse {0}")]
    Parse(String),

    /// Stored session state was not valid JSON.
    #[error("malformed session state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different document formats by
//! providing a tree-sitter grammar, a query selecting heading nodes, and the knowledge of how to
//! read a level and a label off a matched node.

pub mod markdown;

use tree_sitter::Node;

/// Grammar and heading conventions for one document format.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing every heading node as `@heading`.
    fn heading_query(&self) -> &str;

    /// Nesting level of a captured heading node, if it carries one.
    fn heading_level(&self, node: Node<'_>) -> Option<usize>;

    /// Heading label with markup removed.
    fn heading_title(&self, node: Node<'_>, source: &str) -> Option<String>;
}

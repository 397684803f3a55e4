//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents and extracting
//! heading structure from ATX-style headings (# syntax).

use crate::formats::Format;
use tree_sitter::Node;

/// Tree-sitter queries for ATX-style markdown headings (# syntax).
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn heading_level(&self, node: Node<'_>) -> Option<usize> {
        let mut cursor = node.walk();
        let mut children = node.children(&mut cursor);
        children.find_map(|child| {
            child
                .kind()
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse::<usize>().ok())
        })
    }

    fn heading_title(&self, node: Node<'_>, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        let inline = node
            .children(&mut cursor)
            .find(|child| child.kind() == "inline")?;
        let text = inline.utf8_text(source.as_bytes()).ok()?.trim();
        // A closing sequence only counts when separated from the label by whitespace.
        let stripped = text.trim_end_matches('#');
        let title = if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
            stripped.trim_end()
        } else {
            text
        };
        Some(title.to_string())
    }
}

//! Nested, foldable outline built from a flat run of headings.
//!
//! Headings arrive in document order tagged only with a level. The builder keeps a stack of
//! frames, one per open level, where each frame names the container new nodes at that level are
//! appended to. Going deeper opens one frame per level; going shallower closes frames until the
//! heading's own level is on top.
//!
//! Level skips (an h2 followed directly by an h4) must not flatten the structure. Each opened
//! frame nests inside the most recent node of the frame above it, and when that frame has no node
//! yet a synthetic, label-less node stands in for the missing level. Every child therefore sits
//! exactly one level below its parent:
//!
//! ```text
//! ## a            a (2)
//! #### b          └── · (3, synthetic)
//! ## c                └── b (4)
//!                 c (2)
//! ```
//!
//! Nodes live in an arena and refer to each other by index, so the resolver can walk from a node
//! to its ancestors without borrowing the whole tree mutably.

use crate::heading::Heading;
use serde::Serialize;

/// Index of a node in the outline arena.
pub type NodeId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
/// One entry in the outline: a heading, or a synthetic stand-in for a skipped level.
pub struct OutlineNode {
    /// Nesting level this node occupies.
    pub level: usize,
    /// Index into the page's heading list, `None` for synthetic nodes.
    pub heading: Option<usize>,
    /// Containing node, `None` at the top of the forest.
    pub parent: Option<NodeId>,
    /// Directly nested nodes, in document order.
    pub children: Vec<NodeId>,
    /// Whether the reader can fold this node.
    pub foldable: bool,
    /// Whether the children are shown.
    pub expanded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A node that should be drawn, with its indentation.
pub struct OutlineRow {
    /// Node to draw.
    pub node: NodeId,
    /// Indentation depth below the top of the forest.
    pub depth: usize,
}

#[derive(Serialize)]
/// Serialisable nested view of the outline.
pub struct OutlineEntry<'a> {
    /// Anchor id, absent for synthetic nodes.
    pub id: Option<&'a str>,
    /// Heading label, absent for synthetic nodes.
    pub title: Option<&'a str>,
    /// Nesting level.
    pub level: usize,
    /// Whether the node folds.
    pub foldable: bool,
    /// Nested entries.
    pub children: Vec<OutlineEntry<'a>>,
}

#[derive(Clone, Copy)]
enum Container {
    Root,
    Node(NodeId),
}

#[derive(Clone, Copy)]
struct Frame {
    level: usize,
    container: Container,
}

#[derive(Clone, Debug)]
/// Forest of headings with fold state and the single active mark.
pub struct Outline {
    nodes: Vec<OutlineNode>,
    roots: Vec<NodeId>,
    heading_nodes: Vec<NodeId>,
    active: Option<NodeId>,
}

impl Outline {
    #[must_use]
    /// Builds the outline for a page, or `None` when the page has no headings.
    ///
    /// `base_level` is the outermost level collected from the page; deeper first headings are
    /// reached through synthetic nodes. Nodes at `fold_level` or deeper that are immediately
    /// followed by a deeper heading become foldable and start collapsed.
    pub fn build(headings: &[Heading], base_level: usize, fold_level: usize) -> Option<Self> {
        if headings.is_empty() {
            return None;
        }

        let mut outline = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            heading_nodes: Vec::with_capacity(headings.len()),
            active: None,
        };
        let mut stack = vec![Frame {
            level: base_level,
            container: Container::Root,
        }];

        for (index, heading) in headings.iter().enumerate() {
            let level = heading.level;
            let mut top = stack[stack.len() - 1];

            if level > top.level {
                for next_level in (top.level + 1)..=level {
                    let container = match outline.last_child(top.container) {
                        Some(child) => Container::Node(child),
                        None => Container::Node(outline.attach(
                            top.container,
                            next_level - 1,
                            None,
                            false,
                        )),
                    };
                    top = Frame {
                        level: next_level,
                        container,
                    };
                    stack.push(top);
                }
            } else if level < top.level {
                while stack.len() > 1 && stack[stack.len() - 1].level > level {
                    stack.pop();
                }
                top = stack[stack.len() - 1];
            }

            let foldable = level >= fold_level
                && headings
                    .get(index + 1)
                    .is_some_and(|next| next.level > level);
            let node = outline.attach(top.container, level, Some(index), foldable);
            outline.heading_nodes.push(node);
        }

        Some(outline)
    }

    fn last_child(&self, container: Container) -> Option<NodeId> {
        match container {
            Container::Root => self.roots.last().copied(),
            Container::Node(id) => self.nodes[id].children.last().copied(),
        }
    }

    fn attach(
        &mut self,
        container: Container,
        level: usize,
        heading: Option<usize>,
        foldable: bool,
    ) -> NodeId {
        let id = self.nodes.len();
        let parent = match container {
            Container::Root => {
                self.roots.push(id);
                None
            }
            Container::Node(parent) => {
                self.nodes[parent].children.push(id);
                Some(parent)
            }
        };
        self.nodes.push(OutlineNode {
            level,
            heading,
            parent,
            children: Vec::new(),
            foldable,
            expanded: !foldable,
        });
        id
    }

    #[must_use]
    /// Top-level nodes of the forest.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(id)
    }

    #[must_use]
    /// Number of nodes, synthetic ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// Whether the arena is empty (never true for a built outline).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    /// Node created for the heading at `heading_index`.
    pub fn node_for_heading(&self, heading_index: usize) -> Option<NodeId> {
        self.heading_nodes.get(heading_index).copied()
    }

    /// Containing nodes of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|n| n.parent), move |&p| {
            self.nodes[p].parent
        })
    }

    #[must_use]
    /// The node currently marked active.
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    #[must_use]
    /// Heading index of the active node.
    pub fn active_heading(&self) -> Option<usize> {
        self.active.and_then(|id| self.nodes[id].heading)
    }

    /// Marks `id` active and opens it along with every node containing it.
    ///
    /// Expansion is never undone here: nodes opened for an earlier active mark stay open.
    pub fn set_active(&mut self, id: NodeId) {
        if id >= self.nodes.len() {
            return;
        }
        self.active = Some(id);
        self.nodes[id].expanded = true;
        let mut parent = self.nodes[id].parent;
        while let Some(p) = parent {
            self.nodes[p].expanded = true;
            parent = self.nodes[p].parent;
        }
    }

    /// Removes the active mark, leaving expansion as it is.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Flips the fold state of a foldable node. Returns whether anything changed.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.foldable => {
                node.expanded = !node.expanded;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    /// Heading nodes that are currently shown, in display order.
    ///
    /// Synthetic nodes produce no row of their own but still indent what they contain.
    pub fn visible_rows(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        for &root in &self.roots {
            self.collect_rows(root, 0, &mut rows);
        }
        rows
    }

    fn collect_rows(&self, id: NodeId, depth: usize, rows: &mut Vec<OutlineRow>) {
        let node = &self.nodes[id];
        if node.heading.is_some() {
            rows.push(OutlineRow { node: id, depth });
        }
        if node.expanded {
            for &child in &node.children {
                self.collect_rows(child, depth + 1, rows);
            }
        }
    }

    #[must_use]
    /// Nested view of the whole outline, labelled from `headings`.
    pub fn entries<'a>(&self, headings: &'a [Heading]) -> Vec<OutlineEntry<'a>> {
        self.roots
            .iter()
            .map(|&root| self.entry(root, headings))
            .collect()
    }

    fn entry<'a>(&self, id: NodeId, headings: &'a [Heading]) -> OutlineEntry<'a> {
        let node = &self.nodes[id];
        let heading = node.heading.and_then(|index| headings.get(index));
        OutlineEntry {
            id: heading.map(|h| h.id.as_str()),
            title: heading.map(|h| h.title.as_str()),
            level: node.level,
            foldable: node.foldable,
            children: node
                .children
                .iter()
                .map(|&child| self.entry(child, headings))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;

use super::{Outline, OutlineRow};
use crate::heading::Heading;

fn headings(levels: &[usize]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading::new(format!("h{i}"), level, format!("Heading {i}"), i * 10))
        .collect()
}

fn child_headings(outline: &Outline, id: usize) -> Vec<Option<usize>> {
    outline.node(id).unwrap().children.iter().map(|&c| outline.node(c).unwrap().heading).collect()
}

#[test]
fn test_empty_page_has_no_outline() {
    assert!(Outline::build(&[], 2, 3).is_none());
}

#[test]
fn test_siblings_and_children() {
    let outline = Outline::build(&headings(&[2, 3, 3, 2, 4]), 2, 3).unwrap();
    assert_eq!(outline.roots().len(), 2);

    let first = outline.roots()[0];
    assert_eq!(outline.node(first).unwrap().heading, Some(0));
    assert_eq!(child_headings(&outline, first), [Some(1), Some(2)]);

    let second = outline.roots()[1];
    assert_eq!(outline.node(second).unwrap().heading, Some(3));
    // h4 directly under h2 goes through a synthetic level-3 node.
    let children = &outline.node(second).unwrap().children;
    assert_eq!(children.len(), 1);
    let synthetic = outline.node(children[0]).unwrap();
    assert_eq!(synthetic.heading, None);
    assert_eq!(synthetic.level, 3);
    assert_eq!(child_headings(&outline, children[0]), [Some(4)]);
}

#[test]
fn test_level_skip_then_return() {
    let outline = Outline::build(&headings(&[2, 4, 2]), 2, 3).unwrap();
    assert_eq!(outline.roots().len(), 2);
    let first = outline.roots()[0];
    assert_eq!(outline.node(first).unwrap().children.len(), 1);
    let second = outline.roots()[1];
    assert_eq!(outline.node(second).unwrap().heading, Some(2));
    assert!(outline.node(second).unwrap().children.is_empty());
}

#[test]
fn test_children_sit_one_level_below_parent() {
    let outline = Outline::build(&headings(&[3, 2, 5, 3, 6, 4, 2]), 2, 3).unwrap();
    for id in 0..outline.len() {
        let node = outline.node(id).unwrap();
        if let Some(parent) = node.parent {
            assert_eq!(outline.node(parent).unwrap().level + 1, node.level);
        } else {
            assert_eq!(node.level, 2);
        }
    }
    // Every heading got exactly one node.
    for i in 0..7 {
        let id = outline.node_for_heading(i).unwrap();
        assert_eq!(outline.node(id).unwrap().heading, Some(i));
    }
}

#[test]
fn test_deep_first_heading_nests_under_synthetic_root() {
    let outline = Outline::build(&headings(&[3, 3, 2]), 2, 3).unwrap();
    assert_eq!(outline.roots().len(), 2);
    let synthetic = outline.roots()[0];
    assert_eq!(outline.node(synthetic).unwrap().heading, None);
    assert_eq!(child_headings(&outline, synthetic), [Some(0), Some(1)]);
}

#[test]
fn test_foldable_from_fold_level_with_deeper_successor() {
    let outline = Outline::build(&headings(&[2, 3, 4, 3, 2, 3]), 2, 3).unwrap();
    let foldable: Vec<bool> = (0..6)
        .map(|i| outline.node(outline.node_for_heading(i).unwrap()).unwrap().foldable)
        .collect();
    // h2 nodes are above the fold level; only the h3 followed by an h4 folds.
    assert_eq!(foldable, [false, true, false, false, false, false]);

    let folded = outline.node(outline.node_for_heading(1).unwrap()).unwrap();
    assert!(!folded.expanded);
    let open = outline.node(outline.node_for_heading(0).unwrap()).unwrap();
    assert!(open.expanded);
}

#[test]
fn test_collapsed_nodes_hide_descendants() {
    let outline = Outline::build(&headings(&[2, 3, 4, 4, 3]), 2, 3).unwrap();
    let rows = outline.visible_rows();
    let shown: Vec<(Option<usize>, usize)> = rows
        .iter()
        .map(|row| (outline.node(row.node).unwrap().heading, row.depth))
        .collect();
    assert_eq!(shown, [(Some(0), 0), (Some(1), 1), (Some(4), 1)]);
}

#[test]
fn test_set_active_expands_ancestors_and_sticks() {
    let mut outline = Outline::build(&headings(&[2, 3, 4, 5, 3, 4]), 2, 3).unwrap();
    let deep = outline.node_for_heading(3).unwrap();
    outline.set_active(deep);
    assert_eq!(outline.active(), Some(deep));
    assert_eq!(outline.active_heading(), Some(3));
    for ancestor in outline.ancestors(deep).collect::<Vec<_>>() {
        assert!(outline.node(ancestor).unwrap().expanded);
    }

    let later = outline.node_for_heading(5).unwrap();
    outline.set_active(later);
    // Earlier expansion is kept.
    assert!(outline.node(outline.node_for_heading(1).unwrap()).unwrap().expanded);
    assert!(outline.node(outline.node_for_heading(2).unwrap()).unwrap().expanded);

    outline.clear_active();
    assert_eq!(outline.active(), None);
    assert!(outline.node(outline.node_for_heading(1).unwrap()).unwrap().expanded);
}

#[test]
fn test_toggle_only_foldable_nodes() {
    let mut outline = Outline::build(&headings(&[2, 3, 4]), 2, 3).unwrap();
    let root = outline.node_for_heading(0).unwrap();
    assert!(!outline.toggle(root));

    let folder = outline.node_for_heading(1).unwrap();
    assert!(outline.toggle(folder));
    assert!(outline.node(folder).unwrap().expanded);
    assert_eq!(outline.visible_rows().len(), 3);
    assert!(outline.toggle(folder));
    assert_eq!(
        outline.visible_rows(),
        [
            OutlineRow { node: root, depth: 0 },
            OutlineRow {
                node: folder,
                depth: 1
            }
        ]
    );
    assert!(!outline.toggle(999));
}

#[test]
fn test_synthetic_nodes_indent_without_rows() {
    let outline = Outline::build(&headings(&[2, 4]), 2, 5).unwrap();
    let rows = outline.visible_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].depth, 2);
}

#[test]
fn test_entries_serialise_nested() {
    let page = headings(&[2, 4]);
    let outline = Outline::build(&page, 2, 3).unwrap();
    let json = serde_json::to_value(outline.entries(&page)).unwrap();
    assert_eq!(json[0]["id"], "h0");
    assert_eq!(json[0]["children"][0]["id"], serde_json::Value::Null);
    assert_eq!(json[0]["children"][0]["level"], 3);
    assert_eq!(json[0]["children"][0]["children"][0]["title"], "Heading 1");
}

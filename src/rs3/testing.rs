//! Testing utilities for tree and table assertions
//!
//! Two tools that tests should lean on together:
//!
//! 1. **[`assert_tree`]** - fluent structural assertions over a tree,
//!    checking labels, texts and child shapes in one chained expression
//!    instead of nested pattern matches.
//! 2. **[`assert_tables_equivalent`]** - the round-trip check: two record
//!    lists are equivalent iff they decode to the same tree (ids are
//!    renamed consistently by flattening, so record-by-record equality is
//!    the wrong comparison).

use super::build::build_tree;
use super::element::{ElementRecord, RawElement, RelationMap, RelationType};
use super::table::ElementTable;
use super::tree::TreeNode;

/// Entry point for fluent tree assertions.
pub fn assert_tree(node: &TreeNode) -> TreeAssert<'_> {
    TreeAssert {
        node,
        path: "root".to_string(),
    }
}

/// Fluent assertion helper over one tree node.
pub struct TreeAssert<'a> {
    node: &'a TreeNode,
    path: String,
}

impl<'a> TreeAssert<'a> {
    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.node.label(),
            expected,
            "label mismatch at {} in {}",
            self.path,
            self.node
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text(),
            Some(expected),
            "text mismatch at {}",
            self.path
        );
        self
    }

    pub fn leaf(self) -> Self {
        assert!(self.node.is_leaf(), "expected a leaf at {}", self.path);
        self
    }

    pub fn source(self, expected: &str) -> Self {
        assert_eq!(
            self.node.source_id(),
            Some(expected),
            "source id mismatch at {}",
            self.path
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.children().len(),
            expected,
            "child count mismatch at {} in {}",
            self.path,
            self.node
        );
        self
    }

    pub fn child(self, index: usize, check: impl FnOnce(TreeAssert<'_>)) -> Self {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "no child {} at {} (only {} children)",
            index,
            self.path,
            children.len()
        );
        check(TreeAssert {
            node: &children[index],
            path: format!("{}[{}]", self.path, index),
        });
        self
    }
}

/// Rebuild the relation table recorded in a list of resolved records.
pub fn relation_map_from_records(records: &[ElementRecord]) -> RelationMap {
    let mut map = RelationMap::new();
    for record in records {
        if let (Some(name), Some(reltype)) = (&record.relname, record.reltype) {
            match reltype {
                RelationType::Rst | RelationType::Multinuc => map.register(name, reltype),
                RelationType::Span => {}
            }
        }
    }
    map
}

/// Decode a list of records back into a tree. Panics on malformed input;
/// meant for tests only.
pub fn rebuild(records: &[ElementRecord]) -> TreeNode {
    let raw: Vec<RawElement> = records.iter().map(ElementRecord::to_raw).collect();
    let table = ElementTable::build(&raw, &relation_map_from_records(records))
        .expect("records form a valid table");
    build_tree(&table, None).expect("records decode to a tree")
}

/// A copy of the tree without source-id provenance, for structural equality.
pub fn strip_sources(tree: &TreeNode) -> TreeNode {
    if tree.is_empty_tree() {
        return TreeNode::empty();
    }
    match tree.text() {
        Some(text) => TreeNode::leaf(tree.label(), text),
        None => TreeNode::node(
            tree.label(),
            tree.children().iter().map(strip_sources).collect(),
        ),
    }
}

/// Assert that two record lists describe the same discourse structure up to
/// a consistent renaming of ids.
pub fn assert_tables_equivalent(left: &[ElementRecord], right: &[ElementRecord]) {
    assert_eq!(
        strip_sources(&rebuild(left)),
        strip_sources(&rebuild(right)),
        "tables decode to different trees"
    );
}

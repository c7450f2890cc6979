//! RST constituency tree nodes
//!
//! A tree node is either a leaf (nuclearity label plus EDU text), a
//! nuclearity wrapper (`"N"` / `"S"` over one subtree), a relation node
//! (labeled with a relation name, covering a nucleus/satellite pair or a
//! bundle of nuclei), or the empty tree. The `source_id` is a non-owning
//! back-reference to the element that produced the node; it never carries
//! tree structure.

use std::fmt;

/// Label of nucleus nodes.
pub const NUCLEUS_LABEL: &str = "N";
/// Label of satellite nodes.
pub const SATELLITE_LABEL: &str = "S";
/// Label of the synthetic node unifying disconnected annotation roots.
///
/// This is a repair policy for disconnected inputs (e.g. an unattached
/// headline EDU), not an RST-theoretic construct.
pub const VIRTUAL_ROOT_LABEL: &str = "virtual-root";

/// Structural kind of a node, classified once and dispatched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The degenerate empty tree (empty label, no children)
    Empty,
    /// A leaf carrying EDU text
    Leaf,
    /// A `"N"` / `"S"` wrapper over one or more subtrees
    Nuclearity,
    /// A node labeled with a relation name
    Relation,
}

/// One node of an RST constituency tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
    text: Option<String>,
    source_id: Option<String>,
}

impl TreeNode {
    /// The empty tree.
    pub fn empty() -> Self {
        Self {
            label: String::new(),
            children: Vec::new(),
            text: None,
            source_id: None,
        }
    }

    /// A leaf carrying EDU text under a nuclearity label.
    pub fn leaf(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            text: Some(text.into()),
            source_id: None,
        }
    }

    /// An internal node over the given children.
    pub fn node(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
            text: None,
            source_id: None,
        }
    }

    /// Record the element id this node was built from.
    pub fn with_source(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.text.is_some()
    }

    pub fn is_empty_tree(&self) -> bool {
        self.label.is_empty() && self.children.is_empty() && self.text.is_none()
    }

    /// The EDU text, for leaves.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        if self.text.is_some() {
            NodeKind::Leaf
        } else if self.label == NUCLEUS_LABEL || self.label == SATELLITE_LABEL {
            NodeKind::Nuclearity
        } else if self.label.is_empty() && self.children.is_empty() {
            NodeKind::Empty
        } else {
            NodeKind::Relation
        }
    }
}

impl fmt::Display for TreeNode {
    /// Compact bracketed form: `(elaboration (N "a") (S "b"))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty_tree() {
            return write!(f, "()");
        }
        if let Some(text) = &self.text {
            return write!(f, "({} {:?})", self.label, text);
        }
        write!(f, "({}", self.label)?;
        for child in &self.children {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

//! Conversion between flat rs3 annotations and RST constituency trees
//!
//! An rs3 body is a flat parent-pointer graph with only local annotations;
//! the constituency tree is the nested structure Rhetorical Structure Theory
//! actually talks about. The two directions are independent pipelines:
//!
//! - decode: raw elements → [`ElementTable`] → [`build_tree`] → [`TreeNode`]
//! - encode: [`TreeNode`] → [`flatten_tree`] → element records
//!
//! Both are deterministic, synchronous and purely functional over their
//! input; independent documents can be converted concurrently without any
//! coordination. Conversion failures are values ([`Rs3Error`]), never
//! partial output.

pub mod build;
pub mod element;
pub mod error;
pub mod flatten;
pub mod formats;
pub mod position;
pub mod render;
pub mod table;
pub mod testing;
pub mod tree;

// Re-export commonly used types at module root
pub use build::build_tree;
pub use element::{
    ElementKind, ElementRecord, GroupType, Nuclearity, RawElement, RawElementKind, RelationMap,
    RelationType, SPAN_RELATION_NAME,
};
pub use error::Rs3Error;
pub use flatten::{flatten_tree, relation_map_of};
pub use formats::{RelationDef, Rs3Document};
pub use position::PositionResolver;
pub use render::render;
pub use table::ElementTable;
pub use tree::{NodeKind, TreeNode, NUCLEUS_LABEL, SATELLITE_LABEL, VIRTUAL_ROOT_LABEL};

/// Bound on recursion depth for both conversion directions.
///
/// Real discourse trees are bounded by document length; anything deeper is
/// treated as malformed input rather than risking the call stack.
pub(crate) const MAX_DEPTH: usize = 512;

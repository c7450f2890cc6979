//! Tree builder: flat element table → RST constituency tree
//!
//! The builder recursively turns an element id (or the implicit super-root)
//! into a nested tree node. The structural rules live in one exhaustive
//! dispatch over (element kind × relation type × group type); every shape
//! the theory does not define is an explicit error, never a guess.
//!
//! Children of a relation node are always ordered by leftmost-EDU position,
//! so a nucleus precedes its satellite iff it precedes it in the text.

use super::element::{ElementKind, ElementRecord, GroupType, RelationType};
use super::error::Rs3Error;
use super::position::PositionResolver;
use super::table::ElementTable;
use super::tree::{TreeNode, NUCLEUS_LABEL, SATELLITE_LABEL, VIRTUAL_ROOT_LABEL};
use super::MAX_DEPTH;

/// Build the tree for `start`, or for the whole document when `start` is
/// `None`.
///
/// The super-root call resolves the document's parentless elements: one root
/// is entered directly, zero roots yield the empty tree, and two or more
/// roots are unified under a synthetic `"virtual-root"` node whose children
/// are all nucleus-labeled.
pub fn build_tree(table: &ElementTable, start: Option<&str>) -> Result<TreeNode, Rs3Error> {
    let mut builder = TreeBuilder::new(table);
    match start {
        Some(id) => builder.build(id, 0),
        None => builder.build_root(),
    }
}

struct TreeBuilder<'a> {
    table: &'a ElementTable,
    positions: PositionResolver<'a>,
}

impl<'a> TreeBuilder<'a> {
    fn new(table: &'a ElementTable) -> Self {
        Self {
            table,
            positions: PositionResolver::new(table),
        }
    }

    fn build_root(&mut self) -> Result<TreeNode, Rs3Error> {
        let table = self.table;
        match table.roots() {
            [] => Ok(TreeNode::empty()),
            [only] => self.build(only, 0),
            root_ids => {
                // Disconnected annotation: unify all roots under one
                // virtual-root node, each as a nucleus, in text order.
                let mut children = Vec::with_capacity(root_ids.len());
                for root_id in root_ids {
                    let position = self.position_of(root_id)?;
                    let subtree = self.build(root_id, 0)?;
                    children.push((position, wrap_nucleus(subtree, None)));
                }
                children.sort_by_key(|(position, _)| *position);
                Ok(TreeNode::node(
                    VIRTUAL_ROOT_LABEL,
                    children.into_iter().map(|(_, subtree)| subtree).collect(),
                ))
            }
        }
    }

    fn build(&mut self, id: &str, depth: usize) -> Result<TreeNode, Rs3Error> {
        if depth > MAX_DEPTH {
            return Err(Rs3Error::Structural(format!(
                "annotation graph below '{}' exceeds the depth bound ({})",
                id, MAX_DEPTH
            )));
        }
        let elem = self.table.require(id)?.clone();
        match &elem.kind {
            ElementKind::Segment { text } => self.build_segment(&elem, text, depth),
            ElementKind::Group { group_type } => self.build_group(&elem, *group_type, depth),
        }
    }

    fn build_segment(
        &mut self,
        elem: &ElementRecord,
        text: &str,
        depth: usize,
    ) -> Result<TreeNode, Rs3Error> {
        let children: Vec<String> = self.table.children_of(&elem.id).to_vec();
        match elem.reltype {
            // A root segment: either the whole (sub)tree, or the nucleus of
            // one attached satellite.
            None => match children.as_slice() {
                [] => Ok(TreeNode::leaf(NUCLEUS_LABEL, text).with_source(&elem.id)),
                [satellite_id] => {
                    let nucleus = TreeNode::leaf(NUCLEUS_LABEL, text).with_source(&elem.id);
                    self.attach_satellite(nucleus, &elem.id, satellite_id, depth)
                }
                _ => Err(Rs3Error::UnsupportedSchema(format!(
                    "root segment '{}' with {} children (S-N-S schema)",
                    elem.id,
                    children.len()
                ))),
            },
            // The satellite of an N-S relation: a plain leaf.
            Some(RelationType::Rst) => {
                if !children.is_empty() {
                    return Err(Rs3Error::Structural(format!(
                        "satellite segment '{}' should not have children: {:?}",
                        elem.id, children
                    )));
                }
                Ok(TreeNode::leaf(SATELLITE_LABEL, text).with_source(&elem.id))
            }
            // One of several nuclei of a multinuc relation: a plain leaf.
            Some(RelationType::Multinuc) => {
                if !children.is_empty() {
                    return Err(Rs3Error::Structural(format!(
                        "multinuc segment '{}' should not have children: {:?}",
                        elem.id, children
                    )));
                }
                Ok(TreeNode::leaf(NUCLEUS_LABEL, text).with_source(&elem.id))
            }
            // The nucleus of an N-S relation: its one child is the satellite.
            Some(RelationType::Span) => {
                let [satellite_id] = children.as_slice() else {
                    return Err(Rs3Error::Structural(format!(
                        "span segment '{}' should have exactly one child: {:?}",
                        elem.id, children
                    )));
                };
                let nucleus = TreeNode::leaf(NUCLEUS_LABEL, text).with_source(&elem.id);
                self.attach_satellite(nucleus, &elem.id, satellite_id, depth)
            }
        }
    }

    fn build_group(
        &mut self,
        elem: &ElementRecord,
        group_type: Option<GroupType>,
        depth: usize,
    ) -> Result<TreeNode, Rs3Error> {
        let children: Vec<String> = self.table.children_of(&elem.id).to_vec();
        match elem.reltype {
            // The satellite side of an N-S relation, itself headed by one or
            // more sub-relations.
            Some(RelationType::Rst) => match children.as_slice() {
                [] => Err(Rs3Error::TooFewChildren(format!(
                    "satellite group '{}' has nothing to group",
                    elem.id
                ))),
                [child_id] => {
                    let subtree = self.build(child_id, depth + 1)?;
                    Ok(TreeNode::node(SATELLITE_LABEL, vec![subtree]).with_source(&elem.id))
                }
                _ => {
                    let relname = self.relname_of(&children[0])?;
                    let subtrees = self.build_ordered(&children, depth)?;
                    let relation = TreeNode::node(relname, subtrees);
                    Ok(TreeNode::node(SATELLITE_LABEL, vec![relation]).with_source(&elem.id))
                }
            },
            // One of several nuclei of a multinuc relation.
            Some(RelationType::Multinuc) => {
                if children.is_empty() {
                    return Err(Rs3Error::TooFewChildren(format!(
                        "multinuc member group '{}' has nothing to group",
                        elem.id
                    )));
                }
                let mut subtrees = Vec::with_capacity(children.len());
                for child_id in &children {
                    subtrees.push(self.build(child_id, depth + 1)?);
                }
                Ok(TreeNode::node(NUCLEUS_LABEL, subtrees).with_source(&elem.id))
            }
            // A group that heads a structure of its own: either the head of a
            // multinuc bundle or a purely structural span wrapper. Groups
            // without an explicit type behave like span wrappers.
            Some(RelationType::Span) | None => match group_type {
                Some(GroupType::Multinuc) => self.build_multinuc_head(elem, &children, depth),
                Some(GroupType::Span) | None => self.build_span_head(elem, &children, depth),
            },
        }
    }

    /// The head of a multi-nuclear bundle: its multinuc children are the
    /// bundle members; at most one other child may attach as a satellite.
    fn build_multinuc_head(
        &mut self,
        elem: &ElementRecord,
        children: &[String],
        depth: usize,
    ) -> Result<TreeNode, Rs3Error> {
        let mut member_ids = Vec::new();
        let mut other_ids = Vec::new();
        for child_id in children {
            let child = self.table.require(child_id)?;
            if child.reltype == Some(RelationType::Multinuc) {
                member_ids.push(child_id.clone());
            } else {
                other_ids.push(child_id.clone());
            }
        }

        if member_ids.is_empty() {
            return Err(Rs3Error::TooFewChildren(format!(
                "multinuc group '{}' has no multinuc children",
                elem.id
            )));
        }
        let relname = self.relname_of(&member_ids[0])?;
        let members = self.build_ordered(&member_ids, depth)?;
        let bundle = TreeNode::node(relname, members);
        let nucleus = TreeNode::node(NUCLEUS_LABEL, vec![bundle]).with_source(&elem.id);

        match other_ids.as_slice() {
            [] => Ok(nucleus),
            [satellite_id] => {
                let satellite_id = satellite_id.clone();
                self.attach_satellite(nucleus, &elem.id, &satellite_id, depth)
            }
            _ => Err(Rs3Error::TooManyChildren(format!(
                "multinuc group '{}' should not have more than one non-multinuc child: {:?}",
                elem.id, other_ids
            ))),
        }
    }

    /// A structural span wrapper: transparent over one child, a
    /// nucleus/satellite pair over two.
    fn build_span_head(
        &mut self,
        elem: &ElementRecord,
        children: &[String],
        depth: usize,
    ) -> Result<TreeNode, Rs3Error> {
        match children {
            [] => Err(Rs3Error::TooFewChildren(format!(
                "span group '{}' should have at least one child",
                elem.id
            ))),
            [child_id] => self.build(child_id, depth + 1),
            [first, second] => {
                let (nucleus_id, satellite_id) = self.classify_pair(elem, first, second)?;
                let satellite = self.build(&satellite_id, depth + 1)?;
                let nucleus_subtree = self.build(&nucleus_id, depth + 1)?;
                let nucleus = wrap_nucleus(nucleus_subtree, Some(&elem.id));
                let relname = self.relname_of(&satellite_id)?;
                self.combine(&relname, nucleus, &nucleus_id, satellite, &satellite_id)
            }
            _ => Err(Rs3Error::TooManyChildren(format!(
                "span group '{}' should not have more than two children: {:?}",
                elem.id, children
            ))),
        }
    }

    /// Split the two children of a span group into its nucleus and satellite.
    fn classify_pair(
        &self,
        elem: &ElementRecord,
        first: &str,
        second: &str,
    ) -> Result<(String, String), Rs3Error> {
        use super::element::Nuclearity;

        let mut nucleus_id = None;
        let mut satellite_id = None;
        for child_id in [first, second] {
            let slot = match self.table.require(child_id)?.nuclearity {
                Nuclearity::Nucleus => &mut nucleus_id,
                Nuclearity::Satellite => &mut satellite_id,
                Nuclearity::Root => {
                    return Err(Rs3Error::Structural(format!(
                        "child '{}' of span group '{}' has no relation",
                        child_id, elem.id
                    )));
                }
            };
            if slot.replace(child_id.to_string()).is_some() {
                return Err(Rs3Error::Structural(format!(
                    "span group '{}' needs one nucleus and one satellite child",
                    elem.id
                )));
            }
        }
        match (nucleus_id, satellite_id) {
            (Some(nucleus), Some(satellite)) => Ok((nucleus, satellite)),
            _ => Err(Rs3Error::Structural(format!(
                "span group '{}' needs one nucleus and one satellite child",
                elem.id
            ))),
        }
    }

    /// Build the satellite subtree for `satellite_id` and combine it with an
    /// already-built nucleus into a relation node named for the satellite.
    fn attach_satellite(
        &mut self,
        nucleus: TreeNode,
        nucleus_id: &str,
        satellite_id: &str,
        depth: usize,
    ) -> Result<TreeNode, Rs3Error> {
        let satellite = self.build(satellite_id, depth + 1)?;
        let relname = self.relname_of(satellite_id)?;
        self.combine(&relname, nucleus, nucleus_id, satellite, satellite_id)
    }

    /// Order a nucleus and a satellite subtree by leftmost-EDU position and
    /// put them under a relation node.
    fn combine(
        &mut self,
        relname: &str,
        nucleus: TreeNode,
        nucleus_id: &str,
        satellite: TreeNode,
        satellite_id: &str,
    ) -> Result<TreeNode, Rs3Error> {
        let nucleus_position = self.position_of(nucleus_id)?;
        let satellite_position = self.position_of(satellite_id)?;
        let children = if nucleus_position < satellite_position {
            vec![nucleus, satellite]
        } else {
            vec![satellite, nucleus]
        };
        Ok(TreeNode::node(relname, children))
    }

    /// Build subtrees for all `ids`, ordered by leftmost-EDU position.
    fn build_ordered(&mut self, ids: &[String], depth: usize) -> Result<Vec<TreeNode>, Rs3Error> {
        let mut subtrees = Vec::with_capacity(ids.len());
        for id in ids {
            let position = self.position_of(id)?;
            subtrees.push((position, self.build(id, depth + 1)?));
        }
        subtrees.sort_by_key(|(position, _)| *position);
        Ok(subtrees.into_iter().map(|(_, subtree)| subtree).collect())
    }

    fn position_of(&mut self, id: &str) -> Result<usize, Rs3Error> {
        self.positions.position(id).ok_or_else(|| {
            Rs3Error::InternalConsistency(format!(
                "element '{}' has no EDU descendant to order by",
                id
            ))
        })
    }

    fn relname_of(&self, id: &str) -> Result<String, Rs3Error> {
        self.table.require(id)?.relname.clone().ok_or_else(|| {
            Rs3Error::InternalConsistency(format!(
                "element '{}' is expected to carry a relation name",
                id
            ))
        })
    }
}

/// Wrap a subtree as a nucleus unless it already is one.
fn wrap_nucleus(subtree: TreeNode, source: Option<&str>) -> TreeNode {
    if subtree.label() == NUCLEUS_LABEL {
        return subtree;
    }
    let wrapper = TreeNode::node(NUCLEUS_LABEL, vec![subtree]);
    match source {
        Some(id) => wrapper.with_source(id),
        None => wrapper,
    }
}

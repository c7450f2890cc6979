//! Tree flattener: RST constituency tree → flat element table
//!
//! The inverse of tree building. Every node gets a stable preorder id;
//! leaves and relation nodes become records whose parent and relation name
//! are recovered purely from the local neighborhood (the nuclearity label on
//! the node or on the wrapper above it, the enclosing relation node, and —
//! for satellites — the nucleus cousin across that relation). Nuclearity
//! wrappers are structural and produce no record of their own.

use super::element::{
    ElementRecord, GroupType, RawElement, RawElementKind, RelationMap, RelationType,
};
use super::error::Rs3Error;
use super::tree::{NodeKind, TreeNode, NUCLEUS_LABEL, SATELLITE_LABEL};

/// One tree node with its preorder neighborhood.
struct IndexedNode<'a> {
    node: &'a TreeNode,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Preorder arena over a tree. Index 0 is the root; children indices are in
/// left-to-right order.
fn index_tree(tree: &TreeNode) -> Vec<IndexedNode<'_>> {
    let mut nodes: Vec<IndexedNode<'_>> = Vec::new();
    let mut stack = vec![(tree, None::<usize>)];
    while let Some((node, parent)) = stack.pop() {
        let index = nodes.len();
        nodes.push(IndexedNode {
            node,
            parent,
            children: Vec::new(),
        });
        if let Some(parent_index) = parent {
            nodes[parent_index].children.push(index);
        }
        for child in node.children().iter().rev() {
            stack.push((child, Some(index)));
        }
    }
    nodes
}

/// Infer the relation table of a tree from the nuclearity shape of its
/// relation nodes: all-nucleus children make a multinuc relation, a
/// nucleus/satellite pair makes an rst relation.
pub fn relation_map_of(tree: &TreeNode) -> Result<RelationMap, Rs3Error> {
    let mut relations = RelationMap::new();
    if tree.is_empty_tree() {
        return Ok(relations);
    }
    for entry in &index_tree(tree) {
        if entry.node.kind() != NodeKind::Relation {
            continue;
        }
        let reltype = classify_relation_node(entry.node)?;
        relations.register(entry.node.label(), reltype);
    }
    Ok(relations)
}

fn classify_relation_node(node: &TreeNode) -> Result<RelationType, Rs3Error> {
    let labels: Vec<&str> = node.children().iter().map(TreeNode::label).collect();
    if labels.len() >= 2 && labels.iter().all(|label| *label == NUCLEUS_LABEL) {
        return Ok(RelationType::Multinuc);
    }
    if labels.len() == 2
        && labels.contains(&NUCLEUS_LABEL)
        && labels.contains(&SATELLITE_LABEL)
    {
        return Ok(RelationType::Rst);
    }
    Err(Rs3Error::InternalConsistency(format!(
        "relation node '{}' must cover a nucleus/satellite pair or a bundle of nuclei, found {:?}",
        node.label(),
        labels
    )))
}

/// Flatten a tree into element records.
///
/// Output order follows rs3 convention: segments first (in text order), then
/// groups in preorder. The empty tree flattens to no records.
pub fn flatten_tree(tree: &TreeNode) -> Result<Vec<ElementRecord>, Rs3Error> {
    if tree.is_empty_tree() {
        return Ok(Vec::new());
    }
    let relations = relation_map_of(tree)?;
    let nodes = index_tree(tree);
    let ids: Vec<String> = (1..=nodes.len()).map(|i| i.to_string()).collect();

    let mut segments = Vec::new();
    let mut groups = Vec::new();
    for (index, entry) in nodes.iter().enumerate() {
        match entry.node.kind() {
            NodeKind::Leaf | NodeKind::Relation => {}
            NodeKind::Nuclearity | NodeKind::Empty => continue,
        }
        let (relname, parent) = relname_and_parent(&nodes, &ids, &relations, index)?;

        let raw = match entry.node.kind() {
            NodeKind::Leaf => RawElement {
                id: ids[index].clone(),
                parent,
                relname,
                kind: RawElementKind::Segment,
                group_type: None,
                text: entry.node.text().map(str::to_string),
            },
            _ => RawElement {
                id: ids[index].clone(),
                parent,
                relname,
                kind: RawElementKind::Group,
                group_type: Some(infer_group_type(entry.node)),
                text: None,
            },
        };
        let record = ElementRecord::from_raw(&raw, &relations, false)?;
        if record.is_segment() {
            segments.push(record);
        } else {
            groups.push(record);
        }
    }

    segments.extend(groups);
    Ok(segments)
}

/// A group covers a multinuc bundle iff all its children are nuclei.
fn infer_group_type(node: &TreeNode) -> GroupType {
    let children = node.children();
    if children.len() >= 2
        && children
            .iter()
            .all(|child| child.label() == NUCLEUS_LABEL)
    {
        GroupType::Multinuc
    } else {
        GroupType::Span
    }
}

/// Recover the (relation name, parent id) pair of an emitted node from its
/// neighborhood. A node with no enclosing relation is a root record.
fn relname_and_parent(
    nodes: &[IndexedNode<'_>],
    ids: &[String],
    relations: &RelationMap,
    index: usize,
) -> Result<(Option<String>, Option<String>), Rs3Error> {
    let entry = &nodes[index];

    // Locate the nuclearity context: a leaf carries its own label, a relation
    // node reads it from the wrapper above. `attachment` is the direct child
    // of the enclosing relation node on this side.
    let (nuclearity_label, relation_index, attachment) = match entry.node.kind() {
        NodeKind::Leaf => match entry.parent {
            None => return Ok((None, None)),
            Some(parent) => match nodes[parent].node.kind() {
                NodeKind::Relation => (entry.node.label(), Some(parent), index),
                NodeKind::Nuclearity => (nodes[parent].node.label(), nodes[parent].parent, parent),
                _ => {
                    return Err(Rs3Error::InternalConsistency(format!(
                        "leaf {:?} sits under a non-structural parent",
                        entry.node.text().unwrap_or_default()
                    )));
                }
            },
        },
        NodeKind::Relation => match entry.parent {
            None => return Ok((None, None)),
            Some(parent) => match nodes[parent].node.kind() {
                NodeKind::Nuclearity => (nodes[parent].node.label(), nodes[parent].parent, parent),
                _ => {
                    return Err(Rs3Error::InternalConsistency(format!(
                        "relation node '{}' must sit under a nuclearity wrapper",
                        entry.node.label()
                    )));
                }
            },
        },
        NodeKind::Nuclearity | NodeKind::Empty => {
            return Err(Rs3Error::InternalConsistency(
                "only leaves and relation nodes produce records".to_string(),
            ));
        }
    };

    let Some(relation_index) = relation_index else {
        // A lone nucleus wrapper at the top: the node below it is the root.
        return Ok((None, None));
    };
    let relation_entry = &nodes[relation_index];
    if relation_entry.node.kind() != NodeKind::Relation {
        return Err(Rs3Error::InternalConsistency(format!(
            "expected a relation node above '{}'",
            entry.node.label()
        )));
    }

    let relation_label = relation_entry.node.label();
    match relations.get(relation_label) {
        Some(RelationType::Rst) => {
            if nuclearity_label == NUCLEUS_LABEL {
                // The nucleus groups with its span: parent is the relation
                // node, relation name is the structural "span".
                Ok((
                    Some(super::element::SPAN_RELATION_NAME.to_string()),
                    Some(ids[relation_index].clone()),
                ))
            } else if nuclearity_label == SATELLITE_LABEL {
                // The satellite attaches to the nucleus across the relation.
                let cousin = resolve_cousin(nodes, relation_index, attachment)?;
                Ok((
                    Some(relation_label.to_string()),
                    Some(ids[cousin].clone()),
                ))
            } else {
                Err(Rs3Error::InternalConsistency(format!(
                    "child of rst relation '{}' carries nuclearity label '{}'",
                    relation_label, nuclearity_label
                )))
            }
        }
        Some(RelationType::Multinuc) => Ok((
            Some(relation_label.to_string()),
            Some(ids[relation_index].clone()),
        )),
        _ => Err(Rs3Error::InternalConsistency(format!(
            "relation '{}' resolved to neither rst nor multinuc",
            relation_label
        ))),
    }
}

/// The nucleus co-child of an rst relation, descended through its wrapper:
/// the satellite's record points at it.
fn resolve_cousin(
    nodes: &[IndexedNode<'_>],
    relation_index: usize,
    attachment: usize,
) -> Result<usize, Rs3Error> {
    let mut candidates = Vec::new();
    for sibling in nodes[relation_index]
        .children
        .iter()
        .copied()
        .filter(|child| *child != attachment)
    {
        if nodes[sibling].node.is_leaf() {
            candidates.push(sibling);
        } else {
            candidates.extend(nodes[sibling].children.iter().copied());
        }
    }
    match candidates.as_slice() {
        [cousin] => Ok(*cousin),
        _ => Err(Rs3Error::InternalConsistency(format!(
            "satellite under relation node '{}' must have exactly one cousin, found {}",
            nodes[relation_index].node.label(),
            candidates.len()
        ))),
    }
}

//! Unit tests for flattening trees into element records
//!
//! Verifies preorder id assignment, parent/relation recovery from the local
//! neighborhood, group typing, output ordering and the internal-consistency
//! errors on malformed trees.

use rstree::rs3::{
    flatten_tree, relation_map_of, ElementKind, GroupType, RelationType, Rs3Error, TreeNode,
};

fn mono(relname: &str, nucleus: &str, satellite: &str) -> TreeNode {
    TreeNode::node(
        relname,
        vec![
            TreeNode::leaf("N", nucleus),
            TreeNode::leaf("S", satellite),
        ],
    )
}

#[test]
fn test_flatten_single_leaf() {
    let records = flatten_tree(&TreeNode::leaf("N", "the only unit")).expect("leaf flattens");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.id, "1");
    assert_eq!(record.parent, None);
    assert_eq!(record.relname, None);
    assert_eq!(record.text(), Some("the only unit"));
}

#[test]
fn test_flatten_empty_tree() {
    let records = flatten_tree(&TreeNode::empty()).expect("empty tree flattens");
    assert!(records.is_empty());
}

#[test]
fn test_flatten_mono_relation() {
    // Preorder ids: 1 = relation, 2 = nucleus leaf, 3 = satellite leaf.
    // Segments are listed before the group.
    let records = flatten_tree(&mono("elaboration", "first", "second")).expect("tree flattens");
    assert_eq!(records.len(), 3);

    let nucleus = &records[0];
    assert_eq!(nucleus.id, "2");
    assert_eq!(nucleus.parent.as_deref(), Some("1"));
    assert_eq!(nucleus.relname.as_deref(), Some("span"));
    assert_eq!(nucleus.text(), Some("first"));

    let satellite = &records[1];
    assert_eq!(satellite.id, "3");
    assert_eq!(satellite.parent.as_deref(), Some("2"));
    assert_eq!(satellite.relname.as_deref(), Some("elaboration"));
    assert_eq!(satellite.reltype, Some(RelationType::Rst));

    let group = &records[2];
    assert_eq!(group.id, "1");
    assert_eq!(group.parent, None);
    assert_eq!(group.relname, None);
    assert_eq!(
        group.kind,
        ElementKind::Group {
            group_type: Some(GroupType::Span)
        }
    );
}

#[test]
fn test_flatten_multinuc_bundle() {
    // N wrapper (id 1) over the bundle (id 2) with two member leaves.
    let tree = TreeNode::node(
        "N",
        vec![TreeNode::node(
            "list",
            vec![TreeNode::leaf("N", "apples"), TreeNode::leaf("N", "pears")],
        )],
    );
    let records = flatten_tree(&tree).expect("bundle flattens");
    assert_eq!(records.len(), 3);

    for member in &records[..2] {
        assert_eq!(member.parent.as_deref(), Some("2"));
        assert_eq!(member.relname.as_deref(), Some("list"));
        assert_eq!(member.reltype, Some(RelationType::Multinuc));
    }
    let bundle = &records[2];
    assert_eq!(bundle.id, "2");
    assert_eq!(bundle.parent, None);
    assert_eq!(
        bundle.kind,
        ElementKind::Group {
            group_type: Some(GroupType::Multinuc)
        }
    );
}

#[test]
fn test_flatten_nested_satellite_group() {
    // cause(N "a", S(elaboration(N "b", S "c"))): the inner relation node
    // attaches to the outer nucleus leaf as its cousin.
    let tree = TreeNode::node(
        "cause",
        vec![
            TreeNode::leaf("N", "a"),
            TreeNode::node("S", vec![mono("elaboration", "b", "c")]),
        ],
    );
    let records = flatten_tree(&tree).expect("nested tree flattens");

    // Preorder: 1 cause, 2 leaf a, 3 S wrapper, 4 elaboration, 5 leaf b,
    // 6 leaf c. Records: segments a, b, c then groups cause, elaboration.
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["2", "5", "6", "1", "4"]);

    let leaf_a = &records[0];
    assert_eq!(leaf_a.parent.as_deref(), Some("1"));
    assert_eq!(leaf_a.relname.as_deref(), Some("span"));

    let inner = &records[4];
    assert_eq!(inner.id, "4");
    assert_eq!(inner.parent.as_deref(), Some("2"));
    assert_eq!(inner.relname.as_deref(), Some("cause"));

    let leaf_c = &records[2];
    assert_eq!(leaf_c.parent.as_deref(), Some("5"));
    assert_eq!(leaf_c.relname.as_deref(), Some("elaboration"));
}

#[test]
fn test_flatten_virtual_root() {
    // Disconnected repair re-encodes as one multinuc table.
    let tree = TreeNode::node(
        "virtual-root",
        vec![
            TreeNode::leaf("N", "headline"),
            TreeNode::node("N", vec![mono("elaboration", "first", "second")]),
        ],
    );
    let relations = relation_map_of(&tree).expect("relations extract");
    assert_eq!(relations.get("virtual-root"), Some(RelationType::Multinuc));

    let records = flatten_tree(&tree).expect("virtual root flattens");
    let headline = &records[0];
    assert_eq!(headline.parent.as_deref(), Some("1"));
    assert_eq!(headline.relname.as_deref(), Some("virtual-root"));
}

#[test]
fn test_relation_directly_under_relation_is_rejected() {
    let tree = TreeNode::node(
        "cause",
        vec![TreeNode::leaf("N", "a"), mono("elaboration", "b", "c")],
    );
    let result = flatten_tree(&tree);
    assert!(matches!(result, Err(Rs3Error::InternalConsistency(_))));
}

#[test]
fn test_ambiguous_satellite_cousin_is_rejected() {
    // The satellite's nucleus sibling fans out into two subtrees, so the
    // cousin lookup cannot resolve uniquely.
    let tree = TreeNode::node(
        "cause",
        vec![
            TreeNode::node(
                "N",
                vec![mono("elaboration", "x", "y"), mono("elaboration", "p", "q")],
            ),
            TreeNode::leaf("S", "the satellite"),
        ],
    );
    let result = flatten_tree(&tree);
    assert!(matches!(result, Err(Rs3Error::InternalConsistency(_))));
}

#[test]
fn test_text_is_preserved_verbatim() {
    let text = "EDU text, with punctuation — and a dash.";
    let records = flatten_tree(&mono("elaboration", text, "aside")).expect("tree flattens");
    assert_eq!(records[0].text(), Some(text));
}

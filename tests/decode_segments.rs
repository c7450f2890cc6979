//! Unit tests for decoding segment elements
//!
//! Covers the four segment shapes (root, satellite, multinuc member, span
//! nucleus) and the structural errors around them. Trees are verified with
//! assert_tree for deep structure, not just counts.

use rstree::rs3::testing::assert_tree;
use rstree::rs3::{
    build_tree, ElementTable, RawElement, RelationMap, RelationType, Rs3Error,
};

fn relations() -> RelationMap {
    let mut map = RelationMap::new();
    map.register("elaboration", RelationType::Rst);
    map.register("cause", RelationType::Rst);
    map.register("list", RelationType::Multinuc);
    map
}

fn decode(raw: Vec<RawElement>) -> Result<rstree::rs3::TreeNode, Rs3Error> {
    let table = ElementTable::build(&raw, &relations())?;
    build_tree(&table, None)
}

#[test]
fn test_lone_root_segment_is_a_nucleus_leaf() {
    let tree = decode(vec![RawElement::segment("e1", "The only unit.")])
        .expect("single segment decodes");
    assert_tree(&tree)
        .leaf()
        .label("N")
        .text("The only unit.")
        .source("e1");
}

#[test]
fn test_root_segment_with_one_satellite() {
    // The nucleus comes first in the text, so it comes first in the tree.
    let tree = decode(vec![
        RawElement::segment("e1", "Fresh produce arrived this morning."),
        RawElement::segment("e2", "It came from two local farms.").with_parent("e1", "elaboration"),
    ])
    .expect("root segment with satellite decodes");

    assert_tree(&tree)
        .label("elaboration")
        .child_count(2)
        .child(0, |nucleus| {
            nucleus
                .leaf()
                .label("N")
                .text("Fresh produce arrived this morning.");
        })
        .child(1, |satellite| {
            satellite
                .leaf()
                .label("S")
                .text("It came from two local farms.");
        });
}

#[test]
fn test_satellite_preceding_its_nucleus_comes_first() {
    let tree = decode(vec![
        RawElement::segment("e1", "Because the harvest failed,").with_parent("e2", "cause"),
        RawElement::segment("e2", "prices rose sharply."),
    ])
    .expect("leading satellite decodes");

    assert_tree(&tree)
        .label("cause")
        .child_count(2)
        .child(0, |satellite| {
            satellite.label("S").text("Because the harvest failed,");
        })
        .child(1, |nucleus| {
            nucleus.label("N").text("prices rose sharply.");
        });
}

#[test]
fn test_span_segment_builds_its_satellite_relation() {
    // Classic rs3 shape: a span group over a nucleus segment that carries
    // its satellite as a child.
    let tree = decode(vec![
        RawElement::segment("e1", "first").with_parent("g1", "span"),
        RawElement::segment("e2", "second").with_parent("e1", "elaboration"),
        RawElement::group("g1", Some(rstree::rs3::GroupType::Span)),
    ])
    .expect("span segment decodes");

    assert_tree(&tree)
        .label("elaboration")
        .child_count(2)
        .child(0, |nucleus| {
            nucleus.leaf().label("N").text("first").source("e1");
        })
        .child(1, |satellite| {
            satellite.leaf().label("S").text("second").source("e2");
        });
}

#[test]
fn test_root_segment_with_two_children_is_unsupported() {
    let result = decode(vec![
        RawElement::segment("e1", "left satellite").with_parent("e2", "elaboration"),
        RawElement::segment("e2", "the nucleus"),
        RawElement::segment("e3", "right satellite").with_parent("e2", "cause"),
    ]);
    assert!(matches!(result, Err(Rs3Error::UnsupportedSchema(_))));
}

#[test]
fn test_satellite_segment_with_children_is_rejected() {
    let result = decode(vec![
        RawElement::segment("e1", "the nucleus"),
        RawElement::segment("e2", "a satellite").with_parent("e1", "elaboration"),
        RawElement::segment("e3", "dangling").with_parent("e2", "elaboration"),
    ]);
    assert!(matches!(result, Err(Rs3Error::Structural(_))));
}

#[test]
fn test_multinuc_segment_with_children_is_rejected() {
    let result = decode(vec![
        RawElement::group("g1", Some(rstree::rs3::GroupType::Multinuc)),
        RawElement::segment("e1", "one").with_parent("g1", "list"),
        RawElement::segment("e2", "two").with_parent("g1", "list"),
        RawElement::segment("e3", "hanger-on").with_parent("e1", "elaboration"),
    ]);
    assert!(matches!(result, Err(Rs3Error::Structural(_))));
}

#[test]
fn test_span_segment_needs_exactly_one_child() {
    let result = decode(vec![
        RawElement::segment("e1", "nucleus").with_parent("g1", "span"),
        RawElement::segment("e2", "one satellite").with_parent("e1", "elaboration"),
        RawElement::segment("e3", "another satellite").with_parent("e1", "cause"),
        RawElement::group("g1", Some(rstree::rs3::GroupType::Span)),
    ]);
    assert!(matches!(result, Err(Rs3Error::Structural(_))));
}

#[test]
fn test_unknown_start_id_is_reported() {
    let table = ElementTable::build(&[RawElement::segment("e1", "text")], &relations())
        .expect("table builds");
    let result = build_tree(&table, Some("nope"));
    assert_eq!(result, Err(Rs3Error::UnknownElement("nope".to_string())));
}

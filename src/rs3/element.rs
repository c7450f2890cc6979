//! Element records of the flat rs3 annotation graph
//!
//! An rs3 body is a flat list of `segment` and `group` elements. Each element
//! optionally points at a parent element and carries a relation name; the
//! relation name is resolved against the document's relation table to a
//! relation type, which in turn fixes the element's nuclearity. This module
//! holds the raw interchange record ([`RawElement`]), the resolved record
//! ([`ElementRecord`]) and the categorical attributes shared by both.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::error::Rs3Error;

/// The conventional relation name that attaches a nucleus to its span group.
///
/// rs3 relation tables never list this name; it always resolves to the span
/// relation type without being treated as unknown.
pub const SPAN_RELATION_NAME: &str = "span";

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapse internal whitespace runs and trim the ends of an EDU text.
pub(crate) fn normalize_text(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").into_owned()
}

/// Tag distinguishing the two element flavors of an rs3 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawElementKind {
    Segment,
    Group,
}

/// Structural type of a group element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    /// A purely structural wrapper over a nucleus/satellite pair
    Span,
    /// The head of a multi-nuclear bundle
    Multinuc,
}

/// Type of a relation, as registered in the document's relation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// Mono-nuclear: one nucleus, one satellite
    Rst,
    /// Multi-nuclear: two or more nuclei, no satellite
    Multinuc,
    /// Structural attachment of a nucleus to its span (the fallback type)
    Span,
}

/// Nuclearity of an element, derived from its relation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nuclearity {
    /// No relation at all: a structural root of the graph
    Root,
    Nucleus,
    Satellite,
}

/// A flat element as it arrives from (or leaves for) an interchange document.
///
/// This is the exact shape the upstream rs3 reader produces: raw attributes,
/// nothing derived. Segments carry `text`, groups carry `group_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relname: Option<String>,
    pub kind: RawElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<GroupType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RawElement {
    /// Create a segment element carrying an EDU's text.
    pub fn segment(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            relname: None,
            kind: RawElementKind::Segment,
            group_type: None,
            text: Some(text.into()),
        }
    }

    /// Create a group element.
    pub fn group(id: impl Into<String>, group_type: Option<GroupType>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            relname: None,
            kind: RawElementKind::Group,
            group_type,
            text: None,
        }
    }

    /// Attach this element to a parent through the given relation name.
    pub fn with_parent(mut self, parent: impl Into<String>, relname: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self.relname = Some(relname.into());
        self
    }
}

/// Kind of a resolved element, with its kind-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A leaf element carrying an EDU's (normalized) text
    Segment { text: String },
    /// An internal grouping element
    Group { group_type: Option<GroupType> },
}

/// A fully resolved element of the flat annotation graph.
///
/// `reltype` and `nuclearity` are derived once from `relname` and the
/// document's relation table; records are immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub id: String,
    pub parent: Option<String>,
    pub relname: Option<String>,
    /// Present iff `relname` is present; meaningless otherwise
    pub reltype: Option<RelationType>,
    pub nuclearity: Nuclearity,
    pub kind: ElementKind,
}

impl ElementRecord {
    /// Resolve a raw element against a relation table.
    ///
    /// In strict mode an unregistered relation name is an error; otherwise it
    /// falls back to the span type with a warning (see [`RelationMap::lookup`]).
    pub fn from_raw(
        raw: &RawElement,
        relations: &RelationMap,
        strict: bool,
    ) -> Result<Self, Rs3Error> {
        if raw.parent.is_some() != raw.relname.is_some() {
            return Err(Rs3Error::Structural(format!(
                "element '{}' must carry a parent and a relation name together",
                raw.id
            )));
        }

        let reltype = match &raw.relname {
            Some(name) => Some(if strict {
                relations.try_lookup(name)?
            } else {
                relations.lookup(name)
            }),
            None => None,
        };

        let nuclearity = match reltype {
            None => Nuclearity::Root,
            Some(RelationType::Rst) => Nuclearity::Satellite,
            Some(RelationType::Multinuc) | Some(RelationType::Span) => Nuclearity::Nucleus,
        };

        let kind = match raw.kind {
            RawElementKind::Segment => {
                let text = raw.text.as_deref().ok_or_else(|| {
                    Rs3Error::Structural(format!("segment '{}' carries no text", raw.id))
                })?;
                ElementKind::Segment {
                    text: normalize_text(text),
                }
            }
            RawElementKind::Group => ElementKind::Group {
                group_type: raw.group_type,
            },
        };

        Ok(Self {
            id: raw.id.clone(),
            parent: raw.parent.clone(),
            relname: raw.relname.clone(),
            reltype,
            nuclearity,
            kind,
        })
    }

    /// Convert back to the raw interchange shape.
    pub fn to_raw(&self) -> RawElement {
        let (kind, group_type, text) = match &self.kind {
            ElementKind::Segment { text } => (RawElementKind::Segment, None, Some(text.clone())),
            ElementKind::Group { group_type } => (RawElementKind::Group, *group_type, None),
        };
        RawElement {
            id: self.id.clone(),
            parent: self.parent.clone(),
            relname: self.relname.clone(),
            kind,
            group_type,
            text,
        }
    }

    pub fn is_segment(&self) -> bool {
        matches!(self.kind, ElementKind::Segment { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }

    /// The EDU text, for segments.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Segment { text } => Some(text),
            ElementKind::Group { .. } => None,
        }
    }
}

impl fmt::Display for ElementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ElementKind::Segment { text } => write!(f, "Segment('{}', {:?})", self.id, text),
            ElementKind::Group { group_type } => {
                write!(f, "Group('{}', {:?})", self.id, group_type)
            }
        }
    }
}

/// The relation name → relation type table of a document.
///
/// Only `rst` and `multinuc` relations are registered; everything else
/// resolves to the span type. The table is extracted once per document by
/// the upstream reader (decode direction) or inferred from tree shape
/// (encode direction, see [`relation_map_of`](super::flatten::relation_map_of)).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationMap {
    types: HashMap<String, RelationType>,
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a relation name. A conflicting re-registration keeps the
    /// first type and warns.
    pub fn register(&mut self, name: &str, reltype: RelationType) {
        match self.types.get(name) {
            Some(existing) if *existing != reltype => {
                log::warn!(
                    "relation '{}' re-registered as {:?}, keeping {:?}",
                    name,
                    reltype,
                    existing
                );
            }
            Some(_) => {}
            None => {
                self.types.insert(name.to_string(), reltype);
            }
        }
    }

    /// The registered type of a relation name, if any.
    pub fn get(&self, name: &str) -> Option<RelationType> {
        self.types.get(name).copied()
    }

    /// Resolve a relation name, defaulting unknown names to the span type.
    ///
    /// The fallback matches the leniency of existing rs3 tooling but is
    /// surfaced as a warning, since it changes nuclearity inference.
    pub fn lookup(&self, name: &str) -> RelationType {
        if let Some(reltype) = self.get(name) {
            return reltype;
        }
        if name != SPAN_RELATION_NAME {
            log::warn!("unknown relation name '{}', defaulting to span", name);
        }
        RelationType::Span
    }

    /// Strict variant of [`lookup`](Self::lookup): unknown names are errors.
    pub fn try_lookup(&self, name: &str) -> Result<RelationType, Rs3Error> {
        if let Some(reltype) = self.get(name) {
            return Ok(reltype);
        }
        if name == SPAN_RELATION_NAME {
            return Ok(RelationType::Span);
        }
        Err(Rs3Error::UnknownRelation(name.to_string()))
    }

    /// All registered (name, type) pairs, sorted by name.
    pub fn entries(&self) -> Vec<(String, RelationType)> {
        let mut entries: Vec<_> = self
            .types
            .iter()
            .map(|(name, reltype)| (name.clone(), *reltype))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

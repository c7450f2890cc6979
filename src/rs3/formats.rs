//! Interchange documents: serde model plus JSON/YAML helpers
//!
//! A document pairs a relation table with the flat element list, which is
//! all the upstream rs3 reader has to hand over. The XML mechanics of rs3
//! itself stay with that reader; this module only speaks the structured
//! form.

use serde::{Deserialize, Serialize};

use super::build::build_tree;
use super::element::{ElementRecord, RawElement, RelationMap, RelationType};
use super::error::Rs3Error;
use super::flatten::{flatten_tree, relation_map_of};
use super::table::ElementTable;
use super::tree::TreeNode;

/// One entry of a document's relation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDef {
    pub name: String,
    #[serde(rename = "type")]
    pub reltype: RelationType,
}

/// A flat annotation document: relation table plus element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rs3Document {
    #[serde(default)]
    pub relations: Vec<RelationDef>,
    pub elements: Vec<RawElement>,
}

impl Rs3Document {
    pub fn new(relations: Vec<RelationDef>, elements: Vec<RawElement>) -> Self {
        Self {
            relations,
            elements,
        }
    }

    /// The relation table as a lookup map. Span entries carry no information
    /// (span is the fallback type) and are skipped.
    pub fn relation_map(&self) -> RelationMap {
        let mut map = RelationMap::new();
        for def in &self.relations {
            match def.reltype {
                RelationType::Rst | RelationType::Multinuc => {
                    map.register(&def.name, def.reltype)
                }
                RelationType::Span => {}
            }
        }
        map
    }

    /// Decode the whole document into a constituency tree.
    pub fn decode(&self) -> Result<TreeNode, Rs3Error> {
        let table = ElementTable::build(&self.elements, &self.relation_map())?;
        build_tree(&table, None)
    }

    /// Encode a tree into a document, with the relation table inferred from
    /// the tree's shape and sorted by name.
    pub fn encode(tree: &TreeNode) -> Result<Self, Rs3Error> {
        let records = flatten_tree(tree)?;
        let relations = relation_map_of(tree)?
            .entries()
            .into_iter()
            .map(|(name, reltype)| RelationDef { name, reltype })
            .collect();
        Ok(Self {
            relations,
            elements: records.iter().map(ElementRecord::to_raw).collect(),
        })
    }

    pub fn from_json_str(input: &str) -> Result<Self, Rs3Error> {
        serde_json::from_str(input)
            .map_err(|err| Rs3Error::Format(format!("invalid JSON document: {}", err)))
    }

    pub fn to_json_string(&self) -> Result<String, Rs3Error> {
        serde_json::to_string_pretty(self)
            .map_err(|err| Rs3Error::Format(format!("JSON serialization failed: {}", err)))
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, Rs3Error> {
        serde_yaml::from_str(input)
            .map_err(|err| Rs3Error::Format(format!("invalid YAML document: {}", err)))
    }

    pub fn to_yaml_string(&self) -> Result<String, Rs3Error> {
        serde_yaml::to_string(self)
            .map_err(|err| Rs3Error::Format(format!("YAML serialization failed: {}", err)))
    }
}

//! Element table: the in-memory form of a flat rs3 body
//!
//! The table resolves the raw element list once into fixed-shape records and
//! the two indexes everything downstream needs: parent → ordered children,
//! and the left-to-right EDU order (input order of the segments). Lookups
//! return an explicit "not found" instead of defaulting.

use std::collections::HashMap;

use super::element::{ElementRecord, RawElement, RelationMap};
use super::error::Rs3Error;

/// Resolved element records plus the indexes derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    records: Vec<ElementRecord>,
    index: HashMap<String, usize>,
    children: HashMap<String, Vec<String>>,
    edus: Vec<String>,
    roots: Vec<String>,
}

impl ElementTable {
    /// Build a table from raw elements, defaulting unknown relation names to
    /// the span type (with a warning).
    pub fn build(raw: &[RawElement], relations: &RelationMap) -> Result<Self, Rs3Error> {
        Self::build_inner(raw, relations, false)
    }

    /// Build a table, treating unknown relation names as errors.
    pub fn build_strict(raw: &[RawElement], relations: &RelationMap) -> Result<Self, Rs3Error> {
        Self::build_inner(raw, relations, true)
    }

    fn build_inner(
        raw: &[RawElement],
        relations: &RelationMap,
        strict: bool,
    ) -> Result<Self, Rs3Error> {
        let mut records = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut edus = Vec::new();
        let mut roots = Vec::new();

        for element in raw {
            let record = ElementRecord::from_raw(element, relations, strict)?;
            if index.insert(record.id.clone(), records.len()).is_some() {
                return Err(Rs3Error::Structural(format!(
                    "duplicate element id '{}'",
                    record.id
                )));
            }

            match &record.parent {
                Some(parent) => children
                    .entry(parent.clone())
                    .or_default()
                    .push(record.id.clone()),
                None => roots.push(record.id.clone()),
            }
            if record.is_segment() {
                edus.push(record.id.clone());
            }
            records.push(record);
        }

        // Dangling parent pointers would silently drop whole subtrees during
        // tree building; reject them up front.
        for record in &records {
            if let Some(parent) = &record.parent {
                if !index.contains_key(parent) {
                    return Err(Rs3Error::UnknownElement(parent.clone()));
                }
            }
        }

        Ok(Self {
            records,
            index,
            children,
            edus,
            roots,
        })
    }

    /// Look up an element by id.
    pub fn get(&self, id: &str) -> Option<&ElementRecord> {
        self.index.get(id).map(|i| &self.records[*i])
    }

    /// Look up an element by id, failing with [`Rs3Error::UnknownElement`].
    pub fn require(&self, id: &str) -> Result<&ElementRecord, Rs3Error> {
        self.get(id)
            .ok_or_else(|| Rs3Error::UnknownElement(id.to_string()))
    }

    /// The ids of an element's children, in input order. Unknown or childless
    /// elements yield an empty slice.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Segment ids in left-to-right text order.
    pub fn edus(&self) -> &[String] {
        &self.edus
    }

    /// Ids of elements without a parent, in input order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// All records in input order.
    pub fn records(&self) -> &[ElementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

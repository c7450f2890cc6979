//! Position resolver: leftmost-EDU order of arbitrary elements
//!
//! A segment's position is its index in EDU order; a group's position is the
//! minimum position over its children, found by recursive descent. Results
//! are memoized per resolver instance.

use std::collections::HashMap;

use super::table::ElementTable;
use super::MAX_DEPTH;

/// Resolves elements to their leftmost-EDU position within one table.
#[derive(Debug)]
pub struct PositionResolver<'a> {
    table: &'a ElementTable,
    edu_index: HashMap<String, usize>,
    memo: HashMap<String, Option<usize>>,
}

impl<'a> PositionResolver<'a> {
    pub fn new(table: &'a ElementTable) -> Self {
        let edu_index = table
            .edus()
            .iter()
            .enumerate()
            .map(|(position, id)| (id.clone(), position))
            .collect();
        Self {
            table,
            edu_index,
            memo: HashMap::new(),
        }
    }

    /// The position of the leftmost EDU under `id`, or `None` when the
    /// element is unknown or has no EDU descendant.
    pub fn position(&mut self, id: &str) -> Option<usize> {
        self.resolve(id, 0)
    }

    fn resolve(&mut self, id: &str, depth: usize) -> Option<usize> {
        if depth > MAX_DEPTH {
            return None;
        }
        if let Some(cached) = self.memo.get(id) {
            return *cached;
        }

        let result = match self.edu_index.get(id).copied() {
            Some(position) => Some(position),
            None => {
                let table = self.table;
                table
                    .children_of(id)
                    .iter()
                    .filter_map(|child| self.resolve(child, depth + 1))
                    .min()
            }
        };
        self.memo.insert(id.to_string(), result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::element::{GroupType, RawElement, RelationMap, RelationType};
    use super::*;

    fn table() -> ElementTable {
        let mut relations = RelationMap::new();
        relations.register("list", RelationType::Multinuc);
        let raw = vec![
            RawElement::segment("e1", "one").with_parent("inner", "list"),
            RawElement::segment("e2", "two").with_parent("inner", "list"),
            RawElement::segment("e3", "three").with_parent("outer", "list"),
            RawElement::group("inner", Some(GroupType::Multinuc)).with_parent("outer", "list"),
            RawElement::group("outer", Some(GroupType::Multinuc)),
            RawElement::group("lonely", Some(GroupType::Span)),
        ];
        ElementTable::build(&raw, &relations).expect("table builds")
    }

    #[test]
    fn test_segment_positions_follow_input_order() {
        let table = table();
        let mut positions = PositionResolver::new(&table);
        assert_eq!(positions.position("e1"), Some(0));
        assert_eq!(positions.position("e2"), Some(1));
        assert_eq!(positions.position("e3"), Some(2));
    }

    #[test]
    fn test_group_position_is_leftmost_descendant() {
        let table = table();
        let mut positions = PositionResolver::new(&table);
        assert_eq!(positions.position("inner"), Some(0));
        assert_eq!(positions.position("outer"), Some(0));
    }

    #[test]
    fn test_elements_without_edus_have_no_position() {
        let table = table();
        let mut positions = PositionResolver::new(&table);
        assert_eq!(positions.position("lonely"), None);
        assert_eq!(positions.position("ghost"), None);
    }
}

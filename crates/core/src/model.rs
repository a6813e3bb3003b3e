//! Catalog data model
//!
//! These types are what the rest of the workspace works with once upstream
//! responses have been validated. Nothing here is optional: absent upstream
//! fields become empty strings at the client boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a data structure (the upstream `shortName`).
pub type StructureId = String;

/// A named field definition in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Unique element name
    pub name: String,
    /// Upstream data type, such as `Integer` or `String`
    #[serde(rename = "type")]
    pub data_type: String,
    pub description: String,
    pub notes: String,
    /// Allowed values, e.g. `0::500` or `M;F`
    pub value_range: String,
    /// Structures this element is known to appear in
    pub structures: Vec<StructureId>,
}

impl Element {
    /// Create an element with only a name; the other fields are empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: String::new(),
            description: String::new(),
            notes: String::new(),
            value_range: String::new(),
            structures: Vec::new(),
        }
    }

    /// Set the data type
    #[must_use]
    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the value range
    #[must_use]
    pub fn with_value_range(mut self, value_range: impl Into<String>) -> Self {
        self.value_range = value_range.into();
        self
    }

    /// Add a structure the element appears in
    #[must_use]
    pub fn in_structure(mut self, structure: impl Into<StructureId>) -> Self {
        self.structures.push(structure.into());
        self
    }
}

/// Summary of a data structure as returned by discovery calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSummary {
    /// Structure identifier
    pub short_name: StructureId,
    /// Human-readable title
    pub title: String,
    /// Category label, empty if upstream gave none
    pub category: String,
}

/// Deduplicated set of structure identifiers produced by discovery.
///
/// Keeps first-insertion order so that batches are formed the same way for
/// the same discovery output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    order: Vec<StructureId>,
    seen: HashSet<StructureId>,
}

impl CandidateSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier; returns false if it was already present.
    pub fn insert(&mut self, id: impl Into<StructureId>) -> bool {
        let id = id.into();
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.order.push(id);
        true
    }

    /// Whether `id` was already inserted
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Number of identifiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identifiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StructureId> {
        self.order.iter()
    }

    /// Split into ordered batches of at most `size` identifiers.
    ///
    /// A `size` of zero is treated as one.
    #[must_use]
    pub fn batches(&self, size: usize) -> Vec<&[StructureId]> {
        self.order.chunks(size.max(1)).collect()
    }
}

impl<S: Into<StructureId>> FromIterator<S> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<S: Into<StructureId>> Extend<S> for CandidateSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_set_dedups() {
        let set: CandidateSet = ["abc01", "def02", "abc01"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("abc01"));
    }

    #[test]
    fn test_candidate_set_keeps_first_order() {
        let mut set = CandidateSet::new();
        set.extend(["b", "a"]);
        set.extend(["c", "b"]);
        let ids: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_batches_partition() {
        let set: CandidateSet = (0..7).map(|i| format!("s{i}")).collect();
        let batches = set.batches(3);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 3);
        assert_eq!(batches[2].len(), 1);
        assert_eq!(batches[2][0], "s6");
    }

    #[test]
    fn test_batches_zero_size() {
        let set: CandidateSet = ["a", "b"].into_iter().collect();
        assert_eq!(set.batches(0).len(), 2);
    }

    #[test]
    fn test_element_serializes_type_field() {
        let element = Element::named("subjectkey").with_type("GUID");
        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains("\"type\":\"GUID\""));
    }
}

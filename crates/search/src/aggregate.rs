//! Match aggregation: scan retrieved elements, deduplicate, score and rank.

use crate::error::Result;
use crate::matching::{MatchType, QueryTerms};
use crate::relevance::relevance;
use dictsearch_core::{Element, StructureId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bonus for an element name equal to the query
pub const EXACT_NAME_BONUS: f64 = 50.0;

/// Bonus for an element name starting with the query
pub const PREFIX_BONUS: f64 = 20.0;

/// Cap on the length-difference penalty
pub const MAX_LENGTH_PENALTY: f64 = 20.0;

/// One ranked hit from a fuzzy search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub element: Element,
    pub match_type: MatchType,
    /// Ranking score
    pub relevance_score: f64,
    /// Edit-distance relevance of the name; explanatory, not used for ordering
    pub similarity: f64,
    /// Structure the element was found through
    pub source_structure: StructureId,
}

/// Scan retrieved elements for `query` and return ranked, deduplicated matches.
///
/// `retrieved` yields `(structure, elements)` pairs in discovery order. An
/// element seen again through a later structure replaces the earlier record
/// but keeps its position. Output is sorted by descending score; ties keep
/// discovery order.
///
/// # Errors
/// Returns an error if the query is blank.
pub fn scan<'a, I>(retrieved: I, query: &str) -> Result<Vec<MatchRecord>>
where
    I: IntoIterator<Item = (&'a str, &'a [Element])>,
{
    let terms = QueryTerms::new(query)?;
    Ok(scan_with_terms(retrieved, &terms))
}

/// [`scan`] with an already compiled match set.
pub fn scan_with_terms<'a, I>(retrieved: I, terms: &QueryTerms) -> Vec<MatchRecord>
where
    I: IntoIterator<Item = (&'a str, &'a [Element])>,
{
    let hits = retrieved.into_iter().flat_map(|(structure, elements)| {
        elements
            .iter()
            .filter_map(move |element| terms.classify(element).map(|match_type| (structure, element, match_type)))
    });
    rank_matches(hits, terms.query())
}

/// Rank hits that were already classified against `query`.
///
/// `hits` yields `(structure, element, match_type)` in discovery order and
/// `query` must already be normalized. Deduplication and ordering are the
/// same as [`scan`].
pub fn rank_matches<'a, I>(hits: I, query: &str) -> Vec<MatchRecord>
where
    I: IntoIterator<Item = (&'a str, &'a Element, MatchType)>,
{
    let mut records: Vec<MatchRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (structure, element, match_type) in hits {
        let record = MatchRecord {
            element: element.clone(),
            match_type,
            relevance_score: score(match_type, &element.name, query),
            similarity: relevance(&element.name, query),
            source_structure: structure.to_string(),
        };

        match positions.get(&element.name) {
            Some(&index) => records[index] = record,
            None => {
                positions.insert(element.name.clone(), records.len());
                records.push(record);
            }
        }
    }

    // Vec::sort_by is stable
    records.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    records
}

/// Ranking score for a classified hit.
///
/// `query` must already be normalized.
#[must_use]
pub fn score(match_type: MatchType, name: &str, query: &str) -> f64 {
    let name = name.to_lowercase();
    let mut score = match_type.tier();

    if name == query {
        score += EXACT_NAME_BONUS;
    }
    if name.starts_with(query) {
        score += PREFIX_BONUS;
    }

    let diff = name.chars().count().abs_diff(query.chars().count());
    #[allow(clippy::cast_precision_loss)]
    let penalty = (diff as f64).min(MAX_LENGTH_PENALTY);

    score - penalty
}

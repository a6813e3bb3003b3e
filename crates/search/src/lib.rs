//! Scoring and ranking for data dictionary search.
//!
//! This crate provides:
//! - Levenshtein edit distance
//! - Token-level name relevance with typo tolerance
//! - Word-boundary query matching with singular/plural folding
//! - Deduplicating, stably ordered match aggregation

mod aggregate;
mod error;
mod fuzzy;
mod matching;
mod relevance;

pub use aggregate::{rank_matches, scan, scan_with_terms, score, MatchRecord};
pub use error::{Result, SearchError};
pub use fuzzy::{levenshtein_distance, min_token_distance};
pub use matching::{normalize, MatchType, QueryTerms};
pub use relevance::{element_relevance, relevance, PERFECT_MATCH};

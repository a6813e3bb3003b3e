//! Name relevance scoring.
//!
//! Scores how well an element name answers a query using token-level edit
//! distance. Only the ordering produced by these constants is meaningful; the
//! magnitudes are tuning values.

use crate::fuzzy::min_token_distance;
use dictsearch_core::Element;

/// Score for a case-insensitive exact name match.
///
/// Strictly greater than any composite score.
pub const PERFECT_MATCH: f64 = 1_000.0;

/// Bonus for a query token that appears verbatim among the name tokens
pub const EXACT_TOKEN_BONUS: f64 = 100.0;

/// Bonus for a near-miss token, divided by its edit distance
pub const TYPO_BONUS: f64 = 40.0;

/// Largest token distance still treated as a typo
pub const MAX_TYPO_DISTANCE: usize = 2;

/// Bonus when the name extends the query as a hierarchical prefix (`query_...`)
pub const HIERARCHY_BONUS: f64 = 50.0;

/// Multiplier applied for numeric-only inputs and for names not containing the query
pub const DAMPENING: f64 = 0.1;

/// Token delimiter used in element names
pub const TOKEN_DELIMITER: char = '_';

/// Relevance of an element name for a query (higher is better).
///
/// Pure and total: identical inputs always give identical scores and the
/// result does not depend on the case of either argument.
pub fn relevance(name: &str, query: &str) -> f64 {
    let name = name.trim().to_lowercase();
    let query = query.trim().to_lowercase();

    if name == query {
        return PERFECT_MATCH;
    }

    let name_tokens: Vec<&str> = tokenize(&name).collect();
    let query_tokens: Vec<&str> = tokenize(&query).collect();

    let mut score = if query_tokens.is_empty() {
        0.0
    } else {
        let token_total: f64 = query_tokens
            .iter()
            .map(|token| token_bonus(min_token_distance(token, name_tokens.iter().copied())))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let averaged = token_total / query_tokens.len() as f64;
        averaged
    };

    if !query.is_empty() && name.starts_with(&format!("{query}{TOKEN_DELIMITER}")) {
        score += HIERARCHY_BONUS;
    }

    if is_numeric(&name) || is_numeric(&query) {
        score *= DAMPENING;
    }

    if !name.contains(&query) {
        score *= DAMPENING;
    }

    score
}

/// Relevance of an element for a query, scored on the element name.
pub fn element_relevance(element: &Element, query: &str) -> f64 {
    relevance(&element.name, query)
}

fn token_bonus(distance: Option<usize>) -> f64 {
    match distance {
        Some(0) => EXACT_TOKEN_BONUS,
        #[allow(clippy::cast_precision_loss)]
        Some(d) if d <= MAX_TYPO_DISTANCE => TYPO_BONUS / d as f64,
        _ => 0.0,
    }
}

fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    s.split(TOKEN_DELIMITER).filter(|t| !t.is_empty())
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

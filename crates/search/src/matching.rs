//! Word-boundary matching of a query against element text.

use crate::error::{Result, SearchError};
use dictsearch_core::Element;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Where a query hit occurred on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Element name only
    Name,
    /// Description only
    Description,
    /// Name and description
    Both,
}

impl MatchType {
    /// Base score tier: `Both` > `Name` > `Description`
    #[must_use]
    pub fn tier(self) -> f64 {
        match self {
            Self::Both => 100.0,
            Self::Name => 80.0,
            Self::Description => 50.0,
        }
    }

    fn classify(name_hit: bool, description_hit: bool) -> Option<Self> {
        match (name_hit, description_hit) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::Name),
            (false, true) => Some(Self::Description),
            (false, false) => None,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Both => "both",
        };
        f.write_str(label)
    }
}

/// Compiled match set for one query.
///
/// Holds the normalized query and its naive singular/plural counterpart; a
/// term matches only as a whole word, delimited by the start or end of the
/// text or by any character that is not a letter or digit. Underscores count
/// as delimiters, so `tap` matches `tap_count` but not `tapping`.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    query: String,
    terms: Vec<String>,
    pattern: Regex,
}

impl QueryTerms {
    /// Build the match set for `query`.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidQuery`] for a blank query.
    pub fn new(query: &str) -> Result<Self> {
        let query = normalize(query);
        if query.is_empty() {
            return Err(SearchError::InvalidQuery("query is empty".to_string()));
        }

        let mut terms = vec![query.clone()];
        let counterpart = match query.strip_suffix('s') {
            Some(singular) => singular.to_string(),
            None => format!("{query}s"),
        };
        if !counterpart.is_empty() && counterpart != query {
            terms.push(counterpart);
        }

        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?:^|[^\p{{L}}\p{{N}}])(?:{alternation})(?:$|[^\p{{L}}\p{{N}}])"))?;

        Ok(Self {
            query,
            terms,
            pattern,
        })
    }

    /// The normalized (trimmed, lower-cased) query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// All terms in the match set, the query first
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether any term appears in `text` as a whole word (case-insensitive).
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        !text.is_empty() && self.pattern.is_match(&text.to_lowercase())
    }

    /// Classify where the query hits `element`, if anywhere.
    #[must_use]
    pub fn classify(&self, element: &Element) -> Option<MatchType> {
        MatchType::classify(
            self.matches_text(&element.name),
            self.matches_text(&element.description),
        )
    }
}

/// Trim and lower-case a query
#[must_use]
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

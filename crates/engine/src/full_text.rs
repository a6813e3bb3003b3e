//! Reranking of upstream full-text hits.

use dictsearch_api_client::FullTextHit;
use dictsearch_core::Element;
use dictsearch_search::element_relevance;
use serde::Serialize;

/// A full-text hit with its local relevance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHit {
    pub element: Element,
    /// Score reported by the upstream search engine
    pub upstream_score: f64,
    /// Local name relevance; the sort key
    pub relevance: f64,
}

/// Order full-text hits by local name relevance, highest first.
///
/// Ties keep the upstream order.
#[must_use]
pub fn rank_hits(hits: Vec<FullTextHit>, query: &str) -> Vec<RankedHit> {
    let mut ranked: Vec<RankedHit> = hits
        .into_iter()
        .map(|hit| RankedHit {
            relevance: element_relevance(&hit.element, query),
            upstream_score: hit.score,
            element: hit.element,
        })
        .collect();

    ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    ranked
}

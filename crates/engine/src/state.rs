//! Observable search state.

use dictsearch_core::Element;
use dictsearch_search::MatchRecord;
use serde::Serialize;

/// What the orchestrator is currently showing.
///
/// Exactly one state is active at a time. Observers receive it through
/// [`crate::SearchOrchestrator::subscribe`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    /// No search has run, or a new one has just started
    #[default]
    Idle,
    /// A single element answers the query
    ExactHit {
        /// Full element detail
        element: Element,
    },
    /// Fuzzy retrieval is running
    PartialInProgress {
        /// Batches completed so far (0 before the first batch finishes)
        batch_index: usize,
        /// Batches in this run; 0 while candidates are still being discovered
        total_batches: usize,
        /// Distinct matching element names seen so far
        matches_so_far: usize,
    },
    /// Ranked fuzzy results, more than one
    PartialResult {
        /// Records in descending score order
        records: Vec<MatchRecord>,
    },
    /// The search finished without any match
    NoMatch {
        /// The query as entered
        query: String,
        /// Human-readable explanation
        message: String,
    },
    /// The search could not complete
    Failed {
        /// Human-readable reason
        reason: String,
    },
}

impl SearchState {
    /// Whether this state ends a search
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::PartialInProgress { .. })
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Progress report emitted after each retrieval batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchProgress {
    /// 1-based index of the batch just completed
    pub batch_index: usize,
    /// Batches in this run
    pub total_batches: usize,
    /// Distinct matching element names across completed batches
    pub cumulative_match_count: usize,
    /// Structures whose retrieval failed so far
    pub failed_structures: usize,
}

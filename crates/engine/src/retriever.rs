//! Candidate discovery and batched element retrieval.
//!
//! Discovery turns a query into an ordered set of candidate structures.
//! Retrieval then fetches each candidate's elements in fixed-size batches:
//! items within a batch run concurrently, batches run one after another with
//! a pause in between. A structure that fails to load contributes no elements
//! and never aborts the run.

use crate::cache::CandidateCache;
use crate::config::EngineConfig;
use crate::source::{CatalogSource, FetchError};
use crate::state::BatchProgress;
use dictsearch_core::{CandidateSet, Element, StructureId};
use dictsearch_search::{MatchType, QueryTerms};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Element lists gathered by one retrieval run, in candidate order.
///
/// Each element is classified against the query once, while its batch is
/// processed; [`matches`](Self::matches) replays those classifications.
#[derive(Debug, Clone, Default)]
pub struct RetrievedElements {
    structures: Vec<(StructureId, Arc<Vec<Element>>)>,
    /// `(structure index, element index, match type)` in discovery order
    hits: Vec<(usize, usize, MatchType)>,
    failed: Vec<StructureId>,
}

impl RetrievedElements {
    /// `(structure, elements)` pairs in candidate order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Element])> {
        self.structures
            .iter()
            .map(|(id, elements)| (id.as_str(), elements.as_slice()))
    }

    /// Matching elements with their classification, in discovery order
    pub fn matches(&self) -> impl Iterator<Item = (&str, &Element, MatchType)> {
        self.hits.iter().map(|&(structure, element, match_type)| {
            let (id, elements) = &self.structures[structure];
            (id.as_str(), &elements[element], match_type)
        })
    }

    /// Structures that loaded
    #[must_use]
    pub fn len(&self) -> usize {
        self.structures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Total elements across loaded structures
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.structures.iter().map(|(_, elements)| elements.len()).sum()
    }

    /// Structures whose retrieval failed
    #[must_use]
    pub fn failed(&self) -> &[StructureId] {
        &self.failed
    }
}

/// Runs discovery and batched retrieval against a catalog.
///
/// Borrowed per search; the cache belongs to the caller and outlives it.
pub struct BatchRetriever<'a> {
    source: &'a dyn CatalogSource,
    cache: &'a CandidateCache,
    config: &'a EngineConfig,
}

impl<'a> BatchRetriever<'a> {
    #[must_use]
    pub fn new(source: &'a dyn CatalogSource, cache: &'a CandidateCache, config: &'a EngineConfig) -> Self {
        Self { source, cache, config }
    }

    /// Number of batches needed for `candidates`
    #[must_use]
    pub fn batch_count(&self, candidates: &CandidateSet) -> usize {
        candidates.len().div_ceil(self.config.batch_size.max(1))
    }

    /// Build the candidate set for `query`.
    ///
    /// Keyword-search results come first, followed by the structures of each
    /// supplementary category; duplicates keep their first position. A failed
    /// category lookup is logged and skipped.
    ///
    /// # Errors
    /// Returns the keyword search's error if it fails.
    pub async fn discover(&self, query: &str) -> Result<CandidateSet, FetchError> {
        let mut candidates: CandidateSet = self
            .source
            .search_structures(query)
            .await?
            .into_iter()
            .map(|summary| summary.short_name)
            .collect();
        let from_keyword = candidates.len();

        for category in &self.config.supplementary_categories {
            match self.source.structures_in_category(category).await {
                Ok(found) => candidates.extend(found.into_iter().map(|summary| summary.short_name)),
                Err(e) => warn!(category = %category, error = %e, "Supplementary category lookup failed"),
            }
        }

        info!(
            query,
            from_keyword,
            total = candidates.len(),
            "Discovered candidate structures"
        );
        Ok(candidates)
    }

    /// Fetch the elements of every candidate.
    ///
    /// `on_progress` is called after each batch with cumulative counts; if it
    /// returns `false` retrieval stops before the next batch and the elements
    /// gathered so far are returned.
    pub async fn fetch_all<F>(
        &self,
        candidates: &CandidateSet,
        terms: &QueryTerms,
        mut on_progress: F,
    ) -> RetrievedElements
    where
        F: FnMut(BatchProgress) -> bool,
    {
        let batches = candidates.batches(self.config.batch_size);
        let total_batches = batches.len();
        let mut retrieved = RetrievedElements::default();
        let mut matched: HashSet<String> = HashSet::new();

        for (index, batch) in batches.into_iter().enumerate() {
            let results = join_all(batch.iter().map(|id| self.fetch_one(id))).await;

            for (id, result) in batch.iter().zip(results) {
                match result {
                    Ok(elements) => {
                        let structure = retrieved.structures.len();
                        for (position, element) in elements.iter().enumerate() {
                            if let Some(match_type) = terms.classify(element) {
                                retrieved.hits.push((structure, position, match_type));
                                matched.insert(element.name.clone());
                            }
                        }
                        retrieved.structures.push((id.clone(), elements));
                    }
                    Err(e) => {
                        debug!(structure = %id, error = %e, "Skipping structure");
                        retrieved.failed.push(id.clone());
                    }
                }
            }

            let progress = BatchProgress {
                batch_index: index + 1,
                total_batches,
                cumulative_match_count: matched.len(),
                failed_structures: retrieved.failed.len(),
            };
            debug!(
                batch = progress.batch_index,
                total_batches,
                matches = progress.cumulative_match_count,
                "Batch complete"
            );

            if !on_progress(progress) {
                debug!(batch = progress.batch_index, "Retrieval stopped by caller");
                break;
            }

            let is_last = index + 1 == total_batches;
            if !is_last && !self.config.batch_pause.is_zero() {
                tokio::time::sleep(self.config.batch_pause).await;
            }
        }

        retrieved
    }

    /// Elements of one structure, from the cache when possible.
    ///
    /// Concurrent callers for the same structure share one fetch, including
    /// callers from a search that has since been superseded.
    async fn fetch_one(&self, id: &str) -> Result<Arc<Vec<Element>>, FetchError> {
        if let Some(cached) = self.cache.get(id) {
            return Ok(cached);
        }

        let slot = self.cache.pending_slot(id);
        let result = slot
            .get_or_try_init(|| async {
                // A fetch may have completed between the miss and taking the slot
                if let Some(cached) = self.cache.peek(id) {
                    return Ok(cached);
                }
                let elements = Arc::new(self.source.structure_elements(id).await?);
                if !self.cache.put(id, Arc::clone(&elements)) {
                    debug!(structure = %id, size = elements.len(), "Element list too large to cache");
                }
                Ok::<_, FetchError>(elements)
            })
            .await
            .map(Arc::clone);
        self.cache.settle(id, &slot);
        result
    }
}

//! Search orchestration: exact lookup, then fuzzy discovery and retrieval.
//!
//! Every search (and every result selection) takes a new epoch. State is
//! published only while the run's epoch is still current, and the epoch check
//! happens under the state channel's lock, so a superseded run can never
//! overwrite the state of a newer one.

use crate::cache::{CacheStats, CandidateCache};
use crate::config::EngineConfig;
use crate::full_text::{rank_hits, RankedHit};
use crate::retriever::BatchRetriever;
use crate::source::{CatalogSource, FetchError};
use crate::state::SearchState;
use dictsearch_core::history::RecentSearchHistory;
use dictsearch_core::Element;
use dictsearch_search::{normalize, rank_matches, MatchRecord, QueryTerms};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// A run was abandoned because a newer search started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search superseded by a newer query")]
pub struct Superseded;

/// Outcome of a search call: the terminal state it published, or
/// [`Superseded`] if a newer search took over.
pub type SearchResult = Result<SearchState, Superseded>;

/// Drives searches against a catalog and publishes their state.
pub struct SearchOrchestrator {
    source: Arc<dyn CatalogSource>,
    config: EngineConfig,
    cache: CandidateCache,
    history: Mutex<RecentSearchHistory>,
    epoch: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl SearchOrchestrator {
    /// Create an orchestrator with an empty cache and history
    pub fn new(source: Arc<dyn CatalogSource>, config: EngineConfig) -> Self {
        let history = RecentSearchHistory::with_capacity(config.history_capacity);
        let (state, _) = watch::channel(SearchState::Idle);

        Self {
            source,
            cache: CandidateCache::new(config.max_cacheable_elements),
            config,
            history: Mutex::new(history),
            epoch: AtomicU64::new(0),
            state,
        }
    }

    /// Start from a previously saved history
    #[must_use]
    pub fn with_history(self, history: RecentSearchHistory) -> Self {
        if let Ok(mut guard) = self.history.lock() {
            *guard = history;
        }
        self
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// The current state
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Snapshot of the query history, most recent first
    pub fn history(&self) -> RecentSearchHistory {
        self.history
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|_| RecentSearchHistory::with_capacity(self.config.history_capacity))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every cached element list
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Run a search for `query`.
    ///
    /// Tries an exact element lookup first. On a miss it discovers candidate
    /// structures, retrieves their elements in batches and ranks the matches.
    /// A single match is promoted to an exact hit; none yields
    /// [`SearchState::NoMatch`].
    ///
    /// # Errors
    /// Returns [`Superseded`] if another search started before this one
    /// finished. The state then belongs to the newer search.
    #[instrument(skip(self), fields(epoch = tracing::field::Empty))]
    pub async fn search(&self, query: &str) -> SearchResult {
        let epoch = self.begin();
        tracing::Span::current().record("epoch", epoch);

        let query = query.trim();
        if query.is_empty() {
            return self.finish(epoch, SearchState::failed("empty query"));
        }
        let terms = match QueryTerms::new(query) {
            Ok(terms) => terms,
            Err(e) => return self.finish(epoch, SearchState::failed(e.to_string())),
        };

        // Exact path
        match self.source.element(query).await {
            Ok(element) => {
                self.ensure_current(epoch)?;
                info!("Exact match");
                self.record_history(query);
                return self.finish(epoch, SearchState::ExactHit { element });
            }
            Err(e) if e.is_miss() => debug!(error = %e, "No exact match, falling back to fuzzy search"),
            Err(e) => {
                self.ensure_current(epoch)?;
                warn!(error = %e, "Exact lookup failed");
                return self.finish(epoch, SearchState::failed(format!("Lookup error: {e}")));
            }
        }
        self.publish(
            epoch,
            SearchState::PartialInProgress {
                batch_index: 0,
                total_batches: 0,
                matches_so_far: 0,
            },
        )?;

        let retriever = BatchRetriever::new(self.source.as_ref(), &self.cache, &self.config);

        // Discovery
        let candidates = match retriever.discover(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                self.ensure_current(epoch)?;
                warn!(error = %e, "Discovery failed");
                return self.finish(epoch, SearchState::failed(format!("Discovery error: {e}")));
            }
        };
        self.ensure_current(epoch)?;

        if candidates.is_empty() {
            return self.finish(
                epoch,
                SearchState::failed(format!("Discovery error: no data structures found for '{query}'")),
            );
        }

        let total_batches = retriever.batch_count(&candidates);
        self.publish(
            epoch,
            SearchState::PartialInProgress {
                batch_index: 0,
                total_batches,
                matches_so_far: 0,
            },
        )?;

        // Retrieval
        let retrieved = retriever
            .fetch_all(&candidates, &terms, |progress| {
                self.publish(
                    epoch,
                    SearchState::PartialInProgress {
                        batch_index: progress.batch_index,
                        total_batches: progress.total_batches,
                        matches_so_far: progress.cumulative_match_count,
                    },
                )
                .is_ok()
            })
            .await;
        self.ensure_current(epoch)?;

        // Aggregation
        let mut records = rank_matches(retrieved.matches(), terms.query());
        info!(
            structures = retrieved.len(),
            failed = retrieved.failed().len(),
            elements = retrieved.element_count(),
            matches = records.len(),
            "Fuzzy search complete"
        );
        self.record_history(query);

        match records.len() {
            0 => self.finish(
                epoch,
                SearchState::NoMatch {
                    query: query.to_string(),
                    message: format!("No matches for '{query}'"),
                },
            ),
            1 => {
                let only = records.remove(0);
                let element = self.detail_or(only.element).await;
                self.ensure_current(epoch)?;
                self.finish(epoch, SearchState::ExactHit { element })
            }
            _ => self.finish(epoch, SearchState::PartialResult { records }),
        }
    }

    /// Show full detail for a chosen fuzzy result.
    ///
    /// Fetches the element by name; if that fails the record's own element is
    /// shown instead.
    ///
    /// # Errors
    /// Returns [`Superseded`] if another search started meanwhile.
    #[instrument(skip(self, record), fields(element = %record.element.name))]
    pub async fn select_result(&self, record: &MatchRecord) -> SearchResult {
        let epoch = self.begin();

        if record.element.name.trim().is_empty() {
            return self.finish(epoch, SearchState::failed("selected result has no element name"));
        }

        let element = self.detail_or(record.element.clone()).await;
        self.ensure_current(epoch)?;
        self.finish(epoch, SearchState::ExactHit { element })
    }

    /// Exact element lookup without touching search state
    ///
    /// # Errors
    /// Returns the catalog's error when the element cannot be fetched.
    pub async fn lookup(&self, name: &str) -> Result<Element, FetchError> {
        self.source.element(name.trim()).await
    }

    /// Upstream full-text search, reranked by local name relevance.
    ///
    /// Does not change search state or history.
    ///
    /// # Errors
    /// Returns the catalog's error when the search request fails.
    #[instrument(skip(self))]
    pub async fn full_text(&self, query: &str, size: Option<usize>) -> Result<Vec<RankedHit>, FetchError> {
        let query = normalize(query);
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let size = size.unwrap_or(self.config.full_text_size);
        let hits = self.source.full_text(&query, size).await?;
        debug!(hits = hits.len(), "Full-text search returned");
        Ok(rank_hits(hits, &query))
    }

    fn begin(&self) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        // Ignore the result: a yet newer run may already have started
        let _ = self.publish(epoch, SearchState::Idle);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn ensure_current(&self, epoch: u64) -> Result<(), Superseded> {
        if self.is_current(epoch) {
            Ok(())
        } else {
            debug!(epoch, "Run superseded");
            Err(Superseded)
        }
    }

    fn publish(&self, epoch: u64, next: SearchState) -> Result<(), Superseded> {
        let published = self.state.send_if_modified(|state| {
            if self.is_current(epoch) {
                *state = next;
                true
            } else {
                false
            }
        });
        if published { Ok(()) } else { Err(Superseded) }
    }

    fn finish(&self, epoch: u64, terminal: SearchState) -> SearchResult {
        self.publish(epoch, terminal.clone())?;
        Ok(terminal)
    }

    async fn detail_or(&self, fallback: Element) -> Element {
        match self.source.element(&fallback.name).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(element = %fallback.name, error = %e, "Detail fetch failed, showing match record");
                fallback
            }
        }
    }

    fn record_history(&self, query: &str) {
        if let Ok(mut history) = self.history.lock() {
            history.record(query);
        }
    }
}

//! In-memory catalog for engine tests

#![allow(dead_code)]

use async_trait::async_trait;
use dictsearch_api_client::FullTextHit;
use dictsearch_core::{Element, StructureSummary};
use dictsearch_engine::{CatalogSource, EngineConfig, FetchError, SearchState};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{watch, Notify};

/// Holds a structure fetch until released
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockCatalog {
    exact: HashMap<String, Element>,
    exact_transport_failures: HashSet<String>,
    keyword: HashMap<String, Vec<String>>,
    default_keyword: Vec<String>,
    keyword_fails: bool,
    categories: HashMap<String, Vec<String>>,
    structures: HashMap<String, Vec<Element>>,
    failing: HashSet<String>,
    gates: HashMap<String, Arc<Gate>>,
    full_text_hits: Vec<FullTextHit>,
    observed_state: Mutex<Option<watch::Receiver<SearchState>>>,

    pub element_calls: Mutex<Vec<String>>,
    pub keyword_calls: AtomicUsize,
    pub fetch_counts: Mutex<HashMap<String, usize>>,
    /// Search state seen by each keyword search, once `observe` is set
    pub discovery_states: Mutex<Vec<SearchState>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element answerable by exact lookup
    pub fn with_exact(mut self, element: Element) -> Self {
        self.exact.insert(element.name.clone(), element);
        self
    }

    pub fn with_exact_transport_failure(mut self, name: &str) -> Self {
        self.exact_transport_failures.insert(name.to_string());
        self
    }

    /// Keyword search for `term` returns `ids`
    pub fn with_keyword(mut self, term: &str, ids: &[&str]) -> Self {
        self.keyword
            .insert(term.to_string(), ids.iter().map(ToString::to_string).collect());
        self
    }

    /// Keyword search for any unknown term returns `ids`
    pub fn with_default_keyword(mut self, ids: &[&str]) -> Self {
        self.default_keyword = ids.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_failing_keyword_search(mut self) -> Self {
        self.keyword_fails = true;
        self
    }

    pub fn with_category(mut self, category: &str, ids: &[&str]) -> Self {
        self.categories
            .insert(category.to_string(), ids.iter().map(ToString::to_string).collect());
        self
    }

    pub fn with_structure(mut self, id: &str, elements: Vec<Element>) -> Self {
        self.structures.insert(id.to_string(), elements);
        self
    }

    pub fn with_failing_structure(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn with_gate(mut self, id: &str, gate: Arc<Gate>) -> Self {
        self.gates.insert(id.to_string(), gate);
        self
    }

    pub fn with_full_text(mut self, hits: Vec<FullTextHit>) -> Self {
        self.full_text_hits = hits;
        self
    }

    /// Record the published state whenever keyword search runs
    pub fn observe(&self, rx: watch::Receiver<SearchState>) {
        *self.observed_state.lock().unwrap() = Some(rx);
    }

    pub fn fetches(&self, id: &str) -> usize {
        self.fetch_counts
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetch_counts.lock().unwrap().values().sum()
    }

    fn summaries(ids: &[String]) -> Vec<StructureSummary> {
        ids.iter()
            .map(|id| StructureSummary {
                short_name: id.clone(),
                title: format!("Structure {id}"),
                category: String::new(),
            })
            .collect()
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn element(&self, name: &str) -> Result<Element, FetchError> {
        self.element_calls.lock().unwrap().push(name.to_string());
        if self.exact_transport_failures.contains(name) {
            return Err(FetchError::Transport("connection reset".into()));
        }
        self.exact
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("/dataelement/{name}")))
    }

    async fn search_structures(&self, term: &str) -> Result<Vec<StructureSummary>, FetchError> {
        self.keyword_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rx) = self.observed_state.lock().unwrap().as_ref() {
            self.discovery_states.lock().unwrap().push(rx.borrow().clone());
        }
        if self.keyword_fails {
            return Err(FetchError::Status {
                status: 503,
                message: "unavailable".into(),
            });
        }
        let ids = self.keyword.get(term).unwrap_or(&self.default_keyword);
        Ok(Self::summaries(ids))
    }

    async fn structures_in_category(&self, category: &str) -> Result<Vec<StructureSummary>, FetchError> {
        match self.categories.get(category) {
            Some(ids) => Ok(Self::summaries(ids)),
            None => Err(FetchError::Transport(format!("unknown category {category}"))),
        }
    }

    async fn structure_elements(&self, short_name: &str) -> Result<Vec<Element>, FetchError> {
        *self
            .fetch_counts
            .lock()
            .unwrap()
            .entry(short_name.to_string())
            .or_default() += 1;

        if let Some(gate) = self.gates.get(short_name) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        if self.failing.contains(short_name) {
            return Err(FetchError::Transport("timed out".into()));
        }
        self.structures
            .get(short_name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(format!("/datastructure/{short_name}")))
    }

    async fn full_text(&self, _query: &str, size: usize) -> Result<Vec<FullTextHit>, FetchError> {
        Ok(self.full_text_hits.iter().take(size).cloned().collect())
    }
}

/// Fast config: no pause, no supplementary categories
pub fn test_config() -> EngineConfig {
    EngineConfig::default()
        .with_batch_size(2)
        .with_batch_pause(Duration::ZERO)
        .with_supplementary_categories(Vec::<String>::new())
}

pub fn element(name: &str, description: &str) -> Element {
    Element::named(name).with_description(description)
}

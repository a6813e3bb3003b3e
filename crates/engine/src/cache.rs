//! Session cache of structure element lists.
//!
//! Entries live for the lifetime of the owning orchestrator and are never
//! evicted individually. Lists at or above the size threshold are not stored,
//! so the memory held is bounded by `entries * threshold`.
//!
//! Fetches still in flight are tracked as well: every caller that misses on
//! the same structure while a fetch is running waits on that one fetch.

use dictsearch_core::{Element, StructureId};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::OnceCell;

/// Shared slot for one in-flight structure fetch
pub(crate) type PendingFetch = Arc<OnceCell<Arc<Vec<Element>>>>;

/// In-memory map from structure id to its element list
#[derive(Debug)]
pub struct CandidateCache {
    entries: RwLock<HashMap<StructureId, Arc<Vec<Element>>>>,
    pending: Mutex<HashMap<StructureId, PendingFetch>>,
    max_cacheable_elements: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    skipped: AtomicU64,
}

impl CandidateCache {
    /// Create an empty cache that stores lists shorter than `max_cacheable_elements`
    #[must_use]
    pub fn new(max_cacheable_elements: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
            max_cacheable_elements,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// Size threshold; lists with at least this many elements are not cached
    #[must_use]
    pub fn max_cacheable_elements(&self) -> usize {
        self.max_cacheable_elements
    }

    /// Look up a structure's elements
    pub fn get(&self, id: &str) -> Option<Arc<Vec<Element>>> {
        let found = self.peek(id);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a structure's elements; returns `false` if the list was too large
    /// to cache.
    pub fn put(&self, id: impl Into<StructureId>, elements: Arc<Vec<Element>>) -> bool {
        if elements.len() >= self.max_cacheable_elements {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        match self.entries.write() {
            Ok(mut guard) => {
                guard.insert(id.into(), elements);
                true
            }
            Err(_) => false,
        }
    }

    /// Cached entry without touching the hit and miss counters
    pub(crate) fn peek(&self, id: &str) -> Option<Arc<Vec<Element>>> {
        self.entries
            .read()
            .ok()
            .and_then(|guard| guard.get(id).cloned())
    }

    /// The in-flight slot for `id`, created if no fetch is running
    pub(crate) fn pending_slot(&self, id: &str) -> PendingFetch {
        match self.pending.lock() {
            Ok(mut guard) => Arc::clone(guard.entry(id.to_string()).or_default()),
            Err(_) => PendingFetch::default(),
        }
    }

    /// Drop the in-flight slot for `id` once its fetch has settled.
    ///
    /// Only removes `slot` itself; a slot created by a later fetch stays.
    pub(crate) fn settle(&self, id: &str, slot: &PendingFetch) {
        if let Ok(mut guard) = self.pending.lock() {
            if guard.get(id).is_some_and(|current| Arc::ptr_eq(current, slot)) {
                guard.remove(id);
            }
        }
    }

    /// Number of structure fetches currently shared through the cache
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether `id` has a cached entry
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries
            .read()
            .map(|guard| guard.contains_key(id))
            .unwrap_or(false)
    }

    /// Number of cached structures
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        if let Ok(mut guard) = self.entries.write() {
            guard.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
    }

    /// Snapshot of cache usage
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let (entries, cached_elements) = self
            .entries
            .read()
            .map(|guard| (guard.len(), guard.values().map(|list| list.len()).sum()))
            .unwrap_or((0, 0));

        CacheStats {
            entries,
            cached_elements,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            skipped_oversized: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of cached structures
    pub entries: usize,
    /// Total elements held across all entries
    pub cached_elements: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that missed
    pub misses: u64,
    /// Lists refused for being at or over the threshold
    pub skipped_oversized: u64,
}

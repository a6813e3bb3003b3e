//! Bounded recent-search history
//!
//! Most-recent-first list of distinct queries. Persistence is left to the
//! caller; [`RecentSearchHistory::load`] and [`RecentSearchHistory::save`] are
//! provided for callers that want a JSON file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of queries kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Most-recent-first sequence of distinct query strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearchHistory {
    capacity: usize,
    entries: Vec<String>,
}

impl Default for RecentSearchHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RecentSearchHistory {
    /// Empty history with the default capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history holding at most `capacity` queries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Build a history from stored entries, dropping blanks, duplicates and overflow.
    pub fn from_entries<I, S>(capacity: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::with_capacity(capacity);
        for entry in entries {
            let entry = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() || history.entries.iter().any(|e| e == trimmed) {
                continue;
            }
            if history.entries.len() == history.capacity {
                break;
            }
            history.entries.push(trimmed.to_string());
        }
        history
    }

    /// Record a query as the most recent one.
    ///
    /// An existing equal entry moves to the front; the oldest entry falls off
    /// when the history is full. Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Queries, most recent first
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Maximum number of queries kept
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored queries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no query has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every stored query
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load a history from a JSON array of strings; a missing file yields an empty history.
    pub fn load(path: &Path, capacity: usize) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::with_capacity(capacity));
        }
        let content = fs::read_to_string(path)?;
        let entries: Vec<String> =
            serde_json::from_str(&content).map_err(|e| Error::history_corrupt(path, e))?;
        Ok(Self::from_entries(capacity, entries))
    }

    /// Write the history as a JSON array of strings, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

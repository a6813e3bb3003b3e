//! Engine tuning

use dictsearch_core::config::SearchConfig;
use std::time::Duration;

/// Runtime settings for the orchestrator and batch retriever.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Structures fetched concurrently per batch (at least 1)
    pub batch_size: usize,
    /// Pause after each batch except the last
    pub batch_pause: Duration,
    /// Element lists this long or longer are not cached
    pub max_cacheable_elements: usize,
    /// Categories whose structures are always added to the candidate set
    pub supplementary_categories: Vec<String>,
    /// Maximum queries kept in the history
    pub history_capacity: usize,
    /// Hits requested from the upstream full-text search
    pub full_text_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for EngineConfig {
    fn from(search: &SearchConfig) -> Self {
        Self {
            batch_size: search.batch_size.max(1),
            batch_pause: Duration::from_millis(search.batch_pause_ms),
            max_cacheable_elements: search.max_cacheable_elements,
            supplementary_categories: search.supplementary_categories.clone(),
            history_capacity: search.history_capacity,
            full_text_size: search.full_text_size,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_batch_pause(mut self, pause: Duration) -> Self {
        self.batch_pause = pause;
        self
    }

    #[must_use]
    pub fn with_max_cacheable_elements(mut self, max: usize) -> Self {
        self.max_cacheable_elements = max;
        self
    }

    #[must_use]
    pub fn with_supplementary_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supplementary_categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

//! Configuration schema definitions

use crate::error::{Error, Result};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// `[service]`: where the dictionary lives
    #[serde(default)]
    pub service: ServiceConfig,

    /// `[search]`: retrieval and history tuning
    #[serde(default)]
    pub search: SearchConfig,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.service.validate()?;
        self.search.validate()
    }
}

/// Data dictionary service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    /// Base URL of the data dictionary API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Check the URL scheme and timeout
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::invalid_config(
                "service.base_url",
                "must start with http:// or https://",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("service.timeout_secs", "cannot be zero"));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://nda.nih.gov/api/datadictionary/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Fuzzy search tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Structures fetched concurrently per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Structures with this many elements or more are not cached
    #[serde(default = "default_max_cacheable_elements")]
    pub max_cacheable_elements: usize,

    /// Structure categories always added to discovery
    #[serde(default = "default_supplementary_categories")]
    pub supplementary_categories: Vec<String>,

    /// Number of recent searches kept
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Maximum hits requested from the full-text endpoint
    #[serde(default = "default_full_text_size")]
    pub full_text_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            max_cacheable_elements: default_max_cacheable_elements(),
            supplementary_categories: default_supplementary_categories(),
            history_capacity: default_history_capacity(),
            full_text_size: default_full_text_size(),
        }
    }
}

impl SearchConfig {
    /// Check batch and size settings
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_config("search.batch_size", "must be at least 1"));
        }
        if self.history_capacity == 0 {
            return Err(Error::invalid_config("search.history_capacity", "must be at least 1"));
        }
        if self.full_text_size == 0 {
            return Err(Error::invalid_config("search.full_text_size", "must be at least 1"));
        }
        Ok(())
    }
}

fn default_batch_size() -> usize {
    25
}

fn default_batch_pause_ms() -> u64 {
    250
}

fn default_max_cacheable_elements() -> usize {
    2_000
}

fn default_supplementary_categories() -> Vec<String> {
    vec!["Clinical Assessments".to_string()]
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_full_text_size() -> usize {
    100
}

//! Core types for dictsearch
//!
//! This crate provides the pieces shared by the search engine and its front-ends:
//!
//! - **Data model**: elements, structure summaries and candidate sets
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based service and search tuning with validation
//! - **History**: bounded most-recent-first list of past queries
//!
//! # Example
//!
//! ```rust
//! use dictsearch_core::history::RecentSearchHistory;
//!
//! let mut history = RecentSearchHistory::new();
//! history.record("subjectkey");
//! history.record("interview_age");
//! assert_eq!(history.entries()[0], "interview_age");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod history;
pub mod model;

pub use error::{Error, ErrorCode, ErrorReport, Result, ResultExt};
pub use model::{CandidateSet, Element, StructureId, StructureSummary};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, SearchConfig, ServiceConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::history::RecentSearchHistory;
    pub use crate::model::{CandidateSet, Element, StructureId, StructureSummary};
}

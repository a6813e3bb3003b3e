//! Search engine for a remote data dictionary.
//!
//! A query is answered by an exact element lookup when possible. Otherwise the
//! engine discovers candidate data structures, retrieves their elements in
//! rate-limited concurrent batches, and ranks the elements that match the
//! query as a whole word.
//!
//! # Example
//!
//! ```rust,no_run
//! use dictsearch_api_client::DictionaryClient;
//! use dictsearch_engine::{EngineConfig, SearchOrchestrator, SearchState};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DictionaryClient::new()?;
//! let engine = SearchOrchestrator::new(Arc::new(client), EngineConfig::default());
//!
//! match engine.search("interview_age").await? {
//!     SearchState::ExactHit { element } => println!("{}: {}", element.name, element.description),
//!     SearchState::PartialResult { records } => println!("{} matches", records.len()),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod config;
pub mod full_text;
pub mod orchestrator;
pub mod retriever;
pub mod source;
pub mod state;

pub use cache::{CacheStats, CandidateCache};
pub use config::EngineConfig;
pub use full_text::{rank_hits, RankedHit};
pub use orchestrator::{SearchOrchestrator, SearchResult, Superseded};
pub use retriever::{BatchRetriever, RetrievedElements};
pub use source::{CatalogSource, FetchError};
pub use state::{BatchProgress, SearchState};

//! Typed HTTP client for the data dictionary service
//!
//! Wraps the handful of endpoints the search engine needs: exact element
//! lookup, keyword and category structure listing, structure detail, and the
//! full-text element search. Upstream JSON is validated into DTOs and mapped
//! to the `dictsearch-core` model at this boundary.
//!
//! # Example
//!
//! ```rust,no_run
//! use dictsearch_api_client::{ClientConfig, DictionaryClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DictionaryClient::with_config(ClientConfig::from_env())?;
//!
//!     let element = client.elements().get("subjectkey").await?;
//!     println!("{}: {}", element.name, element.description);
//!
//!     let structures = client.structures().search("finger tapping").await?;
//!     println!("{} candidate structures", structures.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::DictionaryClient;
pub use config::ClientConfig;
pub use endpoints::FullTextHit;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::DictionaryClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{ElementsApi, FullTextHit, StructuresApi};
    pub use crate::error::{ApiError, ApiResult};
}

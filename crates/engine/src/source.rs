//! The catalog the engine searches.
//!
//! [`CatalogSource`] is the seam between the search engine and the upstream
//! service. The production implementation is [`DictionaryClient`]; tests
//! supply in-memory catalogs.

use async_trait::async_trait;
use dictsearch_api_client::{ApiError, DictionaryClient, FullTextHit};
use dictsearch_core::{Element, StructureSummary};
use thiserror::Error;

/// Failure of a single catalog call, reduced to what the engine acts on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status
    #[error("service returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// No usable response: connection failure, timeout or malformed body
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Whether this failure means "no such element" on the exact-lookup path
    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Status { .. })
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(path) => Self::NotFound(path),
            ApiError::ApiResponse { status, message } => Self::Status { status, message },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Read access to a data dictionary.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Exact element lookup by name
    async fn element(&self, name: &str) -> Result<Element, FetchError>;

    /// Keyword structure search
    async fn search_structures(&self, term: &str) -> Result<Vec<StructureSummary>, FetchError>;

    /// All structures in a category
    async fn structures_in_category(&self, category: &str) -> Result<Vec<StructureSummary>, FetchError>;

    /// Elements of one structure
    async fn structure_elements(&self, short_name: &str) -> Result<Vec<Element>, FetchError>;

    /// Upstream full-text element search
    async fn full_text(&self, query: &str, size: usize) -> Result<Vec<FullTextHit>, FetchError>;
}

#[async_trait]
impl CatalogSource for DictionaryClient {
    async fn element(&self, name: &str) -> Result<Element, FetchError> {
        Ok(self.elements().get(name).await?)
    }

    async fn search_structures(&self, term: &str) -> Result<Vec<StructureSummary>, FetchError> {
        Ok(self.structures().search(term).await?)
    }

    async fn structures_in_category(&self, category: &str) -> Result<Vec<StructureSummary>, FetchError> {
        Ok(self.structures().by_category(category).await?)
    }

    async fn structure_elements(&self, short_name: &str) -> Result<Vec<Element>, FetchError> {
        Ok(self.structures().elements(short_name).await?)
    }

    async fn full_text(&self, query: &str, size: usize) -> Result<Vec<FullTextHit>, FetchError> {
        Ok(self.elements().full_text(query, size).await?)
    }
}

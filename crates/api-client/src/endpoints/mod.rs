//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of data dictionary
//! endpoints. Response bodies are decoded into DTOs here and converted to the
//! `dictsearch-core` model before leaving the crate.
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | `elements` | `GET /dataelement/{name}`, `POST /search/dataelement/full` |
//! | `structures` | `GET /datastructure?searchTerm=`, `GET /datastructure?category=`, `GET /datastructure/{shortName}` |

pub mod elements;
pub mod structures;

pub use elements::{ElementsApi, FullTextHit};
pub use structures::StructuresApi;

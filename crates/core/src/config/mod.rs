//! Configuration loading and schema definitions
//!
//! Search tuning and service settings shared by the engine and the CLI.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;

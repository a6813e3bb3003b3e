//! CLI command implementations

pub mod config;
pub mod fulltext;
pub mod history;
pub mod lookup;
pub mod search;

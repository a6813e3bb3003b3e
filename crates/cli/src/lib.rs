//! Terminal front-end helpers for dictsearch
//!
//! Provides shared CLI functionality:
//! - Rendering of elements, match lists and search states
//! - Progress display driven by search state updates
//! - Output format selection

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
pub use progress::SearchProgress;

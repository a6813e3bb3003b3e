//! Location of the persisted search history

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the history file location
pub const HISTORY_ENV: &str = "DICTSEARCH_HISTORY";

/// `$DICTSEARCH_HISTORY`, else `<data dir>/dictsearch/history.json`
pub fn history_path() -> PathBuf {
    if let Some(path) = env::var_os(HISTORY_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dictsearch")
        .join("history.json")
}

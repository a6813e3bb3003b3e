//! History command

use crate::history_store::history_path;
use anyhow::{Context, Result};
use dictsearch_cli::output::to_json;
use dictsearch_cli::{OutputFormat, Status};
use dictsearch_core::config::Config;
use dictsearch_core::history::RecentSearchHistory;

/// List recent searches, or clear them
pub fn run(config_path: Option<&str>, clear: bool, format: OutputFormat) -> Result<()> {
    let config = Config::load(config_path)?;
    let path = history_path();
    let mut history = RecentSearchHistory::load(&path, config.schema.search.history_capacity)
        .with_context(|| format!("Failed to read history from {}", path.display()))?;

    if clear {
        history.clear();
        history
            .save(&path)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        if format == OutputFormat::Text {
            Status::success("History cleared");
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&history.entries())?),
        OutputFormat::Text if history.is_empty() => Status::info("No recent searches"),
        OutputFormat::Text => {
            for (i, query) in history.entries().iter().enumerate() {
                println!("{:>2}. {query}", i + 1);
            }
        }
    }
    Ok(())
}

//! Full-text search command

use crate::context::AppContext;
use anyhow::{Context, Result};
use dictsearch_cli::output::{format_count, render_ranked_hits, to_json};
use dictsearch_cli::{OutputFormat, Status};

/// Print upstream full-text hits reranked by name relevance
pub async fn run(config_path: Option<&str>, query: &str, size: Option<usize>, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::load(config_path)?;

    let hits = ctx
        .engine
        .full_text(query, size)
        .await
        .context("Full-text search failed")?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&hits)?),
        OutputFormat::Text if hits.is_empty() => Status::info(&format!("No matches for '{}'", query.trim())),
        OutputFormat::Text => {
            Status::header(&format_count(hits.len(), "hit", "hits"));
            print!("{}", render_ranked_hits(&hits));
        }
    }
    Ok(())
}

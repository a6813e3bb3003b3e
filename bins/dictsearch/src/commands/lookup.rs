//! Exact lookup command

use crate::context::AppContext;
use anyhow::{bail, Result};
use dictsearch_cli::output::{render_element, to_json};
use dictsearch_cli::OutputFormat;
use dictsearch_engine::FetchError;

/// Print one element by exact name
pub async fn run(config_path: Option<&str>, name: &str, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::load(config_path)?;

    let element = match ctx.engine.lookup(name).await {
        Ok(element) => element,
        Err(FetchError::NotFound(_)) => bail!("No element named '{}'", name.trim()),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Json => println!("{}", to_json(&element)?),
        OutputFormat::Text => print!("{}", render_element(&element)),
    }
    Ok(())
}

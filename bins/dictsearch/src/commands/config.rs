//! Config command

use anyhow::Result;
use dictsearch_cli::output::to_json;
use dictsearch_cli::OutputFormat;
use dictsearch_core::config::Config;

/// Print the configuration that commands would run with
pub fn run(config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let config = Config::load(config_path)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&config.schema)?),
        OutputFormat::Text => {
            let source = config.path.as_deref().unwrap_or("built-in defaults");
            println!("# source: {source}");
            print!("{}", toml::to_string_pretty(&config.schema)?);
        }
    }
    Ok(())
}

//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, `None` for defaults
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or the first standard location found.
    ///
    /// Falls back to defaults when no file exists. An explicit `path` that does
    /// not exist is an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => {
                return Err(Error::config(format!("Configuration file not found: {p}"))
                    .with_suggestion("Create .dictsearch.toml or drop --config to use defaults"));
            }
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".dictsearch.toml",
        "dictsearch.toml",
        ".config/dictsearch.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {path}"))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {path}"))?;
    Ok(schema)
}

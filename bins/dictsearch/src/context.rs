//! Wiring from configuration to a ready search engine

use crate::history_store::history_path;
use anyhow::{Context, Result};
use dictsearch_api_client::{ClientConfig, DictionaryClient};
use dictsearch_core::config::Config;
use dictsearch_core::history::RecentSearchHistory;
use dictsearch_engine::{EngineConfig, SearchOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything a network command needs
pub struct AppContext {
    pub engine: Arc<SearchOrchestrator>,
    pub history_path: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config = Config::load(config_path)?;
        if let Some(path) = &config.path {
            debug!(path = %path, "Loaded configuration");
        }

        let client_config = ClientConfig::from_service(&config.schema.service).with_env_overrides();
        debug!(base_url = %client_config.base_url, "Using data dictionary service");
        let client = DictionaryClient::with_config(client_config).context("Invalid service configuration")?;

        let engine_config = EngineConfig::from(&config.schema.search);
        let history_path = history_path();
        let history = match RecentSearchHistory::load(&history_path, engine_config.history_capacity) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %history_path.display(), error = %e, "Ignoring unreadable history");
                RecentSearchHistory::with_capacity(engine_config.history_capacity)
            }
        };

        let engine = SearchOrchestrator::new(Arc::new(client), engine_config).with_history(history);
        Ok(Self {
            engine: Arc::new(engine),
            history_path,
        })
    }

    /// Write the engine's history back to disk; failures are logged only
    pub fn save_history(&self) {
        if let Err(e) = self.engine.history().save(&self.history_path) {
            warn!(path = %self.history_path.display(), error = %e, "Failed to save history");
        }
    }
}

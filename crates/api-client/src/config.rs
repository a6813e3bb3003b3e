//! Configuration for the data dictionary client
//!
//! Built from the TOML `[service]` section, then overridden by environment
//! variables.

use crate::error::{ApiError, ApiResult};
use dictsearch_core::config::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default public data dictionary endpoint
const DEFAULT_API_URL: &str = "https://nda.nih.gov/api/datadictionary/v2";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the data dictionary API
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Value of the User-Agent header
    pub user_agent: String,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("dictsearch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables on top of defaults
    ///
    /// Reads the following environment variables:
    /// - `DICTSEARCH_API_URL`: Base URL of the data dictionary API
    /// - `DICTSEARCH_TIMEOUT_SECS`: Request timeout in seconds
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Create configuration from the `[service]` config section
    #[must_use]
    pub fn from_service(service: &ServiceConfig) -> Self {
        Self {
            base_url: service.base_url.clone(),
            timeout: Duration::from_secs(service.timeout_secs),
            ..Self::default()
        }
    }

    /// Apply `DICTSEARCH_API_URL` / `DICTSEARCH_TIMEOUT_SECS` if set
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("DICTSEARCH_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Some(timeout) = env::var("DICTSEARCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
        {
            self.timeout = timeout;
        }
        self
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.contains("datadictionary"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("dictsearch/"));
    }

    #[test]
    fn test_from_service() {
        let service = ServiceConfig {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 5,
        };
        let config = ClientConfig::from_service(&service);
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://example.org/dd")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.base_url, "https://example.org/dd");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default().with_base_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default().with_timeout(Duration::ZERO).validate().is_err());
    }
}

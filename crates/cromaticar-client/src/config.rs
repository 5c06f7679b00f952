//! Client configuration.
//!
//! Resolved from defaults, then an optional TOML file, then the environment.

use std::path::Path;
use std::time::Duration;

use cromaticar_core::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default catalog API URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the API URL.
pub const API_URL_ENV: &str = "CROMATICAR_API_URL";

/// Environment variable overriding the timeout.
pub const TIMEOUT_ENV: &str = "CROMATICAR_TIMEOUT_SECS";

/// Where the catalog API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        toml::from_str(content).map_err(|e| CatalogError::Config(format!("invalid config: {}", e)))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded client config");
        Self::from_toml_str(&content)
    }

    /// Apply `CROMATICAR_API_URL` and `CROMATICAR_TIMEOUT_SECS`.
    pub fn apply_env(self) -> CatalogResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(mut self, lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                CatalogError::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw))
            })?;
        }

        Ok(self)
    }

    /// Check the values make sense before building a client.
    pub fn validate(&self) -> CatalogResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> CatalogResult<String> {
        toml::to_string(self).map_err(|e| CatalogError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str("base_url = \"https://catalog.example.com/api\"\n").unwrap();
        assert_eq!(config.base_url, "https://catalog.example.com/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .apply_overrides(|key| match key {
                API_URL_ENV => Some(" http://10.0.0.5:8000/api ".to_string()),
                TIMEOUT_ENV => Some("3".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:8000/api");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_bad_timeout_override() {
        let err = ClientConfig::default()
            .apply_overrides(|key| (key == TIMEOUT_ENV).then(|| "ten".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_ENV));
    }

    #[test]
    fn test_validate() {
        let config = ClientConfig {
            base_url: "localhost:3001".to_string(),
            timeout_secs: 10,
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClientConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml_str(&text).unwrap(), config);
    }
}

//! Cart client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CRAFT_API_URL` - Base URL of the Order API (default: <http://localhost:5000>)
//! - `CRAFT_STORAGE_PATH` - File backing the client's local storage
//!   (default: `.craft-culture/local-storage.json`)
//! - `CRAFT_REQUEST_TIMEOUT_SECS` - Order API request timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_STORAGE_PATH: &str = ".craft-culture/local-storage.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Base URL of the Order API
    pub api_url: Url,
    /// Path of the JSON file backing local storage
    pub storage_path: PathBuf,
    /// Timeout for Order API requests
    pub request_timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_url = Url::parse(&env_or_default("CRAFT_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("CRAFT_API_URL".to_string(), e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "CRAFT_API_URL".to_string(),
                format!("unsupported scheme '{}'", api_url.scheme()),
            ));
        }

        let storage_path = PathBuf::from(env_or_default("CRAFT_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        let timeout_secs = env_or_default("CRAFT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CRAFT_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CRAFT_REQUEST_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_url,
            storage_path,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Endpoint that accepts new orders.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` cannot be a base URL.
    pub fn orders_url(&self) -> Result<Url, url::ParseError> {
        let mut base = self.api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("api/orders")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn defaults() -> CartConfig {
        CartConfig::from_lookup(|_| None).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = defaults();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(
            config.storage_path,
            PathBuf::from(".craft-culture/local-storage.json")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CRAFT_API_URL", "https://api.craftculture.in"),
            ("CRAFT_STORAGE_PATH", "/tmp/cart.json"),
            ("CRAFT_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.host_str(), Some("api.craftculture.in"));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [("CRAFT_API_URL", "not a url")],
            [("CRAFT_API_URL", "ftp://example.com")],
            [("CRAFT_REQUEST_TIMEOUT_SECS", "soon")],
            [("CRAFT_REQUEST_TIMEOUT_SECS", "0")],
        ] {
            let result = CartConfig::from_lookup(lookup(&vars));
            assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
        }
    }

    #[test]
    fn test_orders_url() {
        let config = defaults();
        assert_eq!(
            config.orders_url().unwrap().as_str(),
            "http://localhost:5000/api/orders"
        );

        let config = CartConfig {
            api_url: Url::parse("https://example.com/shop").unwrap(),
            ..defaults()
        };
        assert_eq!(
            config.orders_url().unwrap().as_str(),
            "https://example.com/shop/api/orders"
        );
    }
}

//! Client configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const API_URL_VAR: &str = "INVENTORY_API_URL";
pub const STORE_BUFFER_VAR: &str = "INVENTORY_STORE_BUFFER";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_STORE_BUFFER: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidBuffer { var: &'static str, value: String },
}

/// Settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the inventory service, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Capacity of each store's request channel.
    #[serde(default = "default_store_buffer")]
    pub store_buffer: usize,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_store_buffer() -> usize {
    DEFAULT_STORE_BUFFER
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            store_buffer: default_store_buffer(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `INVENTORY_API_URL` and `INVENTORY_STORE_BUFFER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(STORE_BUFFER_VAR) {
            config.store_buffer = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|buffer| *buffer > 0)
                .ok_or(ConfigError::InvalidBuffer {
                    var: STORE_BUFFER_VAR,
                    value,
                })?;
        }
        Ok(config)
    }

    /// Whether an explicit service URL was configured in the environment.
    pub fn remote_configured() -> bool {
        std::env::var(API_URL_VAR).is_ok_and(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.store_buffer, 32);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://inventory.internal/api/"),
            (STORE_BUFFER_VAR, "8"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://inventory.internal/api");
        assert_eq!(config.store_buffer, 8);
    }

    #[test]
    fn test_invalid_buffer() {
        let err = ClientConfig::from_lookup(lookup(&[(STORE_BUFFER_VAR, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBuffer {
                var: STORE_BUFFER_VAR,
                value: "0".into()
            }
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"store_buffer": 4}"#).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.store_buffer, 4);
    }
}

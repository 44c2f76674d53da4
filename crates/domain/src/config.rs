//! Configuration structures
//!
//! Loaded by `blogc_infra::config` from environment variables or a JSON/TOML
//! file. Every section has defaults so a partial file is accepted.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_SERVICE};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Absolute origin plus path prefix, e.g. `https://api.example.com/v1/`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Paths (relative to `base_url`) that never receive a bearer header,
    /// in addition to the login and token-refresh endpoints
    #[serde(default)]
    pub extra_auth_exclusions: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: None,
            extra_auth_exclusions: Vec::new(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Which credential store backend holds the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    Memory,
    /// JSON file on disk
    #[default]
    File,
    /// Platform keychain
    Keychain,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "keychain" => Ok(Self::Keychain),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Credential store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// File path for the `file` backend
    #[serde(default)]
    pub path: Option<String>,
    /// Service name for the `keychain` backend
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::default(), path: None, service_name: default_service_name() }
    }
}

fn default_service_name() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "api": { "timeout_secs": 10 } }"#).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.timeout_secs, Some(10));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.service_name, DEFAULT_KEYCHAIN_SERVICE);
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Keychain".parse::<StorageBackend>(), Ok(StorageBackend::Keychain));
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}

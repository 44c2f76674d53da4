//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `BLOGC_API_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BLOGC_API_BASE_URL`: API origin plus path prefix (required)
//! - `BLOGC_HTTP_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `BLOGC_USER_AGENT`: User-Agent header value
//! - `BLOGC_AUTH_EXCLUSIONS`: Comma-separated extra paths sent without credentials
//! - `BLOGC_STORAGE_BACKEND`: `memory`, `file` or `keychain`
//! - `BLOGC_STORAGE_PATH`: Session file for the `file` backend
//! - `BLOGC_KEYCHAIN_SERVICE`: Service name for the `keychain` backend
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./blogc.json` or `./blogc.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../blogc.{json,toml}` and `../config.{json,toml}` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use blogc_domain::{ApiConfig, BlogcError, Config, Result, StorageBackend, StorageConfig};

const CONFIG_FILE_NAMES: [&str; 4] = ["blogc.json", "blogc.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL
/// variable is missing or a value is invalid, falls back to a config file.
///
/// # Errors
/// Returns `BlogcError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `BLOGC_API_BASE_URL` is required; everything else falls back to the
/// defaults of [`Config`].
///
/// # Errors
/// Returns `BlogcError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("BLOGC_API_BASE_URL")?;
    let timeout_secs = env_parse::<u64>("BLOGC_HTTP_TIMEOUT_SECS")?;
    let user_agent = env_opt("BLOGC_USER_AGENT");
    let extra_auth_exclusions = env_opt("BLOGC_AUTH_EXCLUSIONS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let defaults = StorageConfig::default();
    let backend = env_parse::<StorageBackend>("BLOGC_STORAGE_BACKEND")?.unwrap_or(defaults.backend);

    Ok(Config {
        api: ApiConfig { base_url, timeout_secs, user_agent, extra_auth_exclusions },
        storage: StorageConfig {
            backend,
            path: env_opt("BLOGC_STORAGE_PATH").or(defaults.path),
            service_name: env_opt("BLOGC_KEYCHAIN_SERVICE").unwrap_or(defaults.service_name),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BlogcError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BlogcError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BlogcError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BlogcError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| BlogcError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BlogcError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(BlogcError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the directory of
/// the running executable for `blogc.{json,toml}` and `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    probe_in(&roots)
}

fn probe_in(roots: &[PathBuf]) -> Option<PathBuf> {
    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `BlogcError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        BlogcError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; empty values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| BlogcError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

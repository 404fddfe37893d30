// SPDX-License-Identifier: Apache-2.0

//! Configuration management for secapi.
//!
//! Provides layered configuration from files and environment variables.
//! Credentials are not part of this configuration; see [`crate::auth`].
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `SECAPI_`)
//! 2. Config file: `~/.config/secapi/config.toml`
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Pin a different Snyk REST API version
//! SECAPI_SNYK__API_VERSION=2024-10-15 secapi snyk list-groups
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::SecApiError;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP transport settings.
    pub http: HttpConfig,
    /// Snyk API settings.
    pub snyk: SnykConfig,
    /// Wiz API settings.
    pub wiz: WizConfig,
}

/// HTTP transport settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Snyk API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SnykConfig {
    /// Base URL without trailing slash.
    pub api_url: String,
    /// REST API version date sent as `?version=`.
    pub api_version: String,
}

impl Default for SnykConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.snyk.io".to_string(),
            api_version: "2025-01-01".to_string(),
        }
    }
}

/// Wiz API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WizConfig {
    /// OAuth2 token endpoint.
    pub auth_url: String,
    /// GraphQL endpoint override; derived from the data center when unset.
    pub api_url: Option<String>,
    /// Directory holding `<name>.graphql` / `<name>.vars.graphql` pairs.
    pub queries_dir: PathBuf,
}

impl Default for WizConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://auth.app.wiz.io/oauth/token".to_string(),
            api_url: None,
            queries_dir: PathBuf::from("wiz_queries"),
        }
    }
}

impl WizConfig {
    /// GraphQL endpoint for a data center, honoring the `api_url` override.
    #[must_use]
    pub fn graphql_url(&self, data_center: &str) -> String {
        match &self.api_url {
            Some(url) => url.clone(),
            None => format!("https://api.{data_center}.app.wiz.io/graphql"),
        }
    }
}

/// Returns the secapi configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/secapi`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("secapi");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("secapi")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `SECAPI_` and double underscore
/// for nested keys (e.g., `SECAPI_HTTP__TIMEOUT_SECONDS`).
///
/// # Errors
///
/// Returns `SecApiError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, SecApiError> {
    let config_path = config_file_path();

    let config = Config::builder()
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        .add_source(
            Environment::with_prefix("SECAPI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

//! Client Configuration
//!
//! Centralized configuration loading for the chat client, supporting a TOML
//! file at `~/.config/ragchat/client.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! api_url = "http://localhost:8000"
//! request_timeout_secs = 60
//! health_timeout_secs = 5
//!
//! [ui]
//! tick_ms = 100
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default service address
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default whole-request timeout for chat and auth calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for the liveness probe
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Default UI redraw interval
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Environment variable for the service address
pub const ENV_API_URL: &str = "RAGCHAT_API_URL";
/// Environment variable for the request timeout, in seconds
pub const ENV_REQUEST_TIMEOUT: &str = "RAGCHAT_REQUEST_TIMEOUT_SECS";
/// Environment variable for the health-probe timeout, in seconds
pub const ENV_HEALTH_TIMEOUT: &str = "RAGCHAT_HEALTH_TIMEOUT_SECS";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the effective configuration last came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Service base URL
    pub api_url: Option<String>,

    /// Chat/auth request timeout in seconds
    pub request_timeout_secs: Option<u64>,

    /// Health probe timeout in seconds
    pub health_timeout_secs: Option<u64>,
}

/// UI section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiToml {
    /// Redraw interval in milliseconds
    pub tick_ms: Option<u64>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// `[backend]` section
    pub backend: BackendToml,
    /// `[ui]` section
    pub ui: UiToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL, e.g. `http://localhost:8000`
    pub api_url: String,
    /// Whole-request timeout for chat and auth calls
    pub request_timeout: Duration,
    /// Timeout for the liveness probe
    pub health_timeout: Duration,
    /// UI redraw interval
    pub tick: Duration,
    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,
    /// Highest-priority layer that changed anything
    pub source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
            tick: DEFAULT_TICK,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Load from the default file location and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// `POST` endpoint for questions
    #[must_use]
    pub fn chat_url(&self) -> String {
        self.endpoint("api/chat")
    }

    /// `POST` endpoint for sign-in
    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint("api/auth/login")
    }

    /// `POST` endpoint for account creation
    #[must_use]
    pub fn signup_url(&self) -> String {
        self.endpoint("api/auth/signup")
    }

    /// `GET` endpoint for liveness
    #[must_use]
    pub fn health_url(&self) -> String {
        self.endpoint("")
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url.trim().trim_end_matches('/'))
    }

    /// Check that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a non-HTTP URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        let host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"));
        match host {
            Some(rest) if !rest.trim_matches('/').is_empty() => {}
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "api_url must be an http(s) URL, got {:?}",
                    self.api_url
                )))
            }
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.health_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "health timeout must be greater than zero".to_string(),
            ));
        }
        if self.tick.is_zero() {
            return Err(ConfigError::ValidationError(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/ragchat/client.toml` or
/// `~/.config/ragchat/client.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ragchat").join("client.toml"))
}

/// Load configuration from all sources with proper priority
///
/// CLI arguments are not handled here; apply [`ConfigOverrides`] afterwards.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// If `path` is `None`, only defaults and environment variables are used.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_with_env(path, |key| std::env::var(key).ok())
}

fn load_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);

    Ok(config)
}

fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    if let Some(url) = toml.backend.api_url.as_deref().map(str::trim) {
        config.api_url = url.to_string();
    }
    if let Some(secs) = toml.backend.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = toml.backend.health_timeout_secs {
        config.health_timeout = Duration::from_secs(secs);
    }
    if let Some(ms) = toml.ui.tick_ms {
        config.tick = Duration::from_millis(ms);
    }
}

fn apply_env_config<F>(config: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
        config.api_url = url.trim().to_string();
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env(ENV_REQUEST_TIMEOUT) {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => {
                config.request_timeout = Duration::from_secs(secs);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %timeout, "Ignoring invalid {ENV_REQUEST_TIMEOUT}"),
        }
    }
    if let Some(timeout) = env(ENV_HEALTH_TIMEOUT) {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => {
                config.health_timeout = Duration::from_secs(secs);
                config.source = ConfigSource::Env;
            }
            Err(_) => tracing::warn!(value = %timeout, "Ignoring invalid {ENV_HEALTH_TIMEOUT}"),
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Service URL override
    pub api_url: Option<String>,

    /// Request timeout override (seconds)
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set service URL override
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set request timeout override
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut ClientConfig) {
        if self.api_url.is_some() || self.request_timeout_secs.is_some() {
            config.source = ConfigSource::Cli;
        }

        if let Some(url) = self.api_url.as_deref().map(str::trim) {
            config.api_url = url.to_string();
        }

        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

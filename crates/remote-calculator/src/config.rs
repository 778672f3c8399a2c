//! Service client configuration
//!
//! The base URL is deployment-specific (hosted service vs. local backend), so
//! it is never hard-coded in the request path: it comes from a YAML file,
//! the environment, or the command line, in increasing priority.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "REMOTE_CALC_BASE_URL";

/// Environment variable providing the bearer token
pub const TOKEN_ENV: &str = "REMOTE_CALC_TOKEN";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// The base URL cannot be used for requests
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Connection settings for the arithmetic service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://calc.example.com`
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout in milliseconds; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Local development backend
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    /// Creates a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the bearer token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Request timeout, if configured
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Parses a configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Loads a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Applies `REMOTE_CALC_BASE_URL` and `REMOTE_CALC_TOKEN` overrides
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Base URL without trailing slashes
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Checks that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> ConfigResult<reqwest::Url> {
        let raw = self.normalized_base_url();
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = reqwest::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{other}'"))),
        }
        if url.query().is_some() {
            return Err(invalid("query strings are not allowed".to_string()));
        }
        Ok(url)
    }
}

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Notification stream settings
    #[serde(default)]
    pub stream: StreamConfig,

    /// Console logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if Url::parse(&self.api.base_url).is_err() {
            return Err(AppError::validation("api.base_url is not a valid URL"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.stream.endpoint.trim().is_empty() {
            return Err(AppError::validation("stream.endpoint is empty"));
        }
        Ok(())
    }

    /// Resolve the notification stream URL.
    ///
    /// `stream.endpoint` may be an absolute URL or a path resolved
    /// against `api.base_url`.
    pub fn stream_url(&self) -> Result<Url> {
        if let Ok(url) = Url::parse(&self.stream.endpoint) {
            return Ok(url);
        }
        let base = Url::parse(&self.api.base_url)?;
        Ok(base.join(&self.stream.endpoint)?)
    }
}

/// REST API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the scheduling service API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (REST calls only, never the stream)
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Notification stream settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Stream endpoint, absolute or relative to `api.base_url`
    #[serde(default = "defaults::stream_endpoint")]
    pub endpoint: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::stream_endpoint(),
        }
    }
}

/// Console logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum console level: debug, info, warn, error
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Show indented per-item detail lines
    #[serde(default = "defaults::show_detail")]
    pub show_detail: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_detail: defaults::show_detail(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "http://localhost:8080/api/".to_string()
    }

    pub fn user_agent() -> String {
        format!("offerdesk/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn stream_endpoint() -> String {
        "events".to_string()
    }

    pub fn log_level() -> String {
        "info".to_string()
    }

    pub fn show_detail() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stream_url_relative() {
        let config = Config::default();
        let url = config.stream_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/events");
    }

    #[test]
    fn test_stream_url_absolute() {
        let mut config = Config::default();
        config.stream.endpoint = "https://feed.example.edu/changes".to_string();
        let url = config.stream_url().unwrap();
        assert_eq!(url.as_str(), "https://feed.example.edu/changes");
    }

    #[test]
    fn test_partial_toml_uses_field_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://sched.example.edu/api/\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://sched.example.edu/api/");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.stream.endpoint, "events");
    }
}

//! Build-time Configuration
//!
//! The frontend runs in the browser, so settings are baked in at compile
//! time with `option_env!` and fall back to defaults when unset or invalid.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn, Level};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),
    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base address every path is appended to (no trailing slash)
    pub base_url: String,
    pub log_level: Level,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            log_level: Level::INFO,
        }
    }
}

impl ApiConfig {
    pub fn load() -> Self {
        Self::from_values(option_env!("RESTAURANT_API_URL"), option_env!("RESTAURANT_LOG_LEVEL"))
    }

    pub fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: try_load("RESTAURANT_API_URL", base_url, defaults.base_url, parse_base_url),
            log_level: try_load("RESTAURANT_LOG_LEVEL", log_level, defaults.log_level, parse_log_level),
        }
    }
}

fn try_load<T: Display>(
    key: &str,
    value: Option<&str>,
    default: T,
    parse: fn(&str) -> Result<T, ConfigError>,
) -> T {
    let Some(raw) = value else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    parse(raw).unwrap_or_else(|e| {
        warn!("Invalid {key} value: {e}, using default: {default}");
        default
    })
}

pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed.split("://").nth(1).is_some_and(|host| !host.is_empty());
    if has_scheme && has_host {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_string()))
    }
}

pub fn parse_log_level(raw: &str) -> Result<Level, ConfigError> {
    Level::from_str(raw.trim()).map_err(|_| ConfigError::InvalidLogLevel(raw.to_string()))
}

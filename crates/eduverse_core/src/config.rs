//! Sync client configuration.
//!
//! # Responsibility
//! - Hold server location, paging and polling settings.
//! - Normalize and validate values before any network component uses them.
//!
//! # Invariants
//! - A validated `base_url` has an http(s) scheme and no trailing `/`.
//! - `page_size` stays within `1..=MAX_PAGE_SIZE`.
//! - Intervals and timeouts are never zero.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_STATS_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    PageSizeOutOfRange(u32),
    ZeroDuration(&'static str),
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "base_url must start with http:// or https://, got `{value}`")
            }
            Self::PageSizeOutOfRange(value) => {
                write!(f, "page_size must be within 1..={MAX_PAGE_SIZE}, got {value}")
            }
            Self::ZeroDuration(field) => write!(f, "{field} must be greater than zero"),
            Self::Parse(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for the notification synchronizer and its pollers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub base_url: String,
    pub page_size: u32,
    pub refresh_interval_secs: u64,
    pub stats_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// Sent as a bearer token when set.
    pub auth_token: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            stats_interval_secs: DEFAULT_STATS_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            auth_token: None,
        }
    }
}

impl SyncConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// Missing keys fall back to defaults.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()
    }

    /// Returns a normalized copy, or the first invalid field.
    pub fn validate(mut self) -> ConfigResult<Self> {
        self.base_url = normalize_base_url(self.base_url.as_str())?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeOutOfRange(self.page_size));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("refresh_interval_secs"));
        }
        if self.stats_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration("stats_interval_secs"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("request_timeout_secs"));
        }
        self.auth_token = self
            .auth_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Ok(self)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn normalize_base_url(raw: &str) -> ConfigResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidBaseUrl(raw.trim().to_string()));
    }
    Ok(trimmed.to_string())
}

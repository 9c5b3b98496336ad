//! Configuration for the synchronization layer.
//!
//! `SyncConfig` can be embedded with [`SyncConfig::default`] or loaded from
//! a TOML file. Loaded configs are validated field by field; unknown fields
//! are rejected.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Base URL of the remote resource API, e.g. `https://bids.example.com/api`.
    pub api_base_url: String,
    /// Per-request transport timeout.
    pub request_timeout_ms: u64,
    /// Total attempts per logical request, including the first.
    pub retry_attempts: u32,
    /// Base for the linear inter-attempt backoff (`base * attempt_number`).
    pub backoff_base_ms: u64,
    /// Time-to-live for cached entries.
    pub cache_ttl_ms: u64,
    /// Maximum number of cache entries before FIFO eviction.
    pub cache_max_entries: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: 30_000,
            retry_attempts: 3,
            backoff_base_ms: 1_000,
            cache_ttl_ms: 300_000,
            cache_max_entries: 100,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse config TOML: {reason}")]
    Parse { reason: String },

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl SyncConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: SyncConfig = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_attempts",
                reason: "must be > 0".to_string(),
            });
        }
        if self.backoff_base_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_base_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.cache_ttl_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache_ttl_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.cache_max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache_max_entries",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

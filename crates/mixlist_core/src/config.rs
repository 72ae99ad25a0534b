//! Runtime configuration assembled from defaults and environment variables.
//!
//! # Responsibility
//! - Resolve storage, image, and log locations.
//! - Resolve the quote endpoint and editor policies.
//!
//! # Invariants
//! - Every `MIXLIST_*` variable is optional; blank values count as unset.
//! - Invalid values are reported with the variable name, never ignored.

use crate::db::SchemaMismatchPolicy;
use crate::logging::{default_log_level, normalize_log_level};
use crate::policy::{ImageRetention, NumericPolicy};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "MIXLIST_DATA_DIR";
pub const ENV_DB_PATH: &str = "MIXLIST_DB_PATH";
pub const ENV_IMAGE_DIR: &str = "MIXLIST_IMAGE_DIR";
pub const ENV_LOG_DIR: &str = "MIXLIST_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "MIXLIST_LOG_LEVEL";
pub const ENV_QUOTE_BASE_URL: &str = "MIXLIST_QUOTE_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "MIXLIST_HTTP_TIMEOUT_SECS";
pub const ENV_IMAGE_RETENTION: &str = "MIXLIST_IMAGE_RETENTION";
pub const ENV_NUMERIC_POLICY: &str = "MIXLIST_NUMERIC_POLICY";

pub const DEFAULT_QUOTE_BASE_URL: &str = "https://quoteslate.vercel.app";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DB_FILE_NAME: &str = "mixlist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

/// Fully resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub image_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub quote_base_url: String,
    pub http_timeout_secs: u64,
    pub image_retention: ImageRetention,
    pub numeric_policy: NumericPolicy,
    pub schema_mismatch: SchemaMismatchPolicy,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            image_dir: data_dir.join("images"),
            log_dir: data_dir.join("logs"),
            log_level: default_log_level().to_string(),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            image_retention: ImageRetention::default(),
            numeric_policy: NumericPolicy::default(),
            schema_mismatch: SchemaMismatchPolicy::default(),
        }
    }

    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = get(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("mixlist"));
        let mut config = Self::with_data_dir(data_dir);

        if let Some(value) = get(ENV_DB_PATH) {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_IMAGE_DIR) {
            config.image_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_LOG_LEVEL) {
            config.log_level = normalize_log_level(&value)
                .map_err(|err| ConfigError {
                    var: ENV_LOG_LEVEL,
                    message: err.to_string(),
                })?
                .to_string();
        }
        if let Some(value) = get(ENV_QUOTE_BASE_URL) {
            config.quote_base_url = value.trim_end_matches('/').to_string();
        }
        if let Some(value) = get(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout_secs = value.parse().map_err(|_| ConfigError {
                var: ENV_HTTP_TIMEOUT_SECS,
                message: format!("expected seconds as a whole number, got `{value}`"),
            })?;
        }
        if let Some(value) = get(ENV_IMAGE_RETENTION) {
            config.image_retention = value.parse().map_err(|message| ConfigError {
                var: ENV_IMAGE_RETENTION,
                message,
            })?;
        }
        if let Some(value) = get(ENV_NUMERIC_POLICY) {
            config.numeric_policy = value.parse().map_err(|message| ConfigError {
                var: ENV_NUMERIC_POLICY,
                message,
            })?;
        }

        Ok(config)
    }
}

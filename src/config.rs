// src/config.rs
//!
//! SDK configuration
//!
//! Loaded from a JSON document handed over by the host app. Every section has
//! defaults so a partial document is enough.

use crate::api::ApiConfig;
use crate::cache::CacheConfig;
use crate::faq::FaqServiceConfig;
use crate::file_path::FilePathConfig;
use crate::form::FormServiceConfig;
use crate::system_settings::SystemSettingsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config '{path}': {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Invalid config: {reason}")]
    Invalid { reason: String },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// Host platform. Decides the asset root and the default export folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            other => Err(ConfigError::UnsupportedPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SdkConfig {
    pub platform: Platform,
    /// Default `tracing` filter, `RUST_LOG` takes precedence
    pub log_level: String,
    /// Directory holding the bundled `www/assets` tree
    pub assets_dir: PathBuf,
    pub file_paths: FilePathConfig,
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub form: FormServiceConfig,
    pub faq: FaqServiceConfig,
    pub system_settings: SystemSettingsConfig,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            log_level: "info".to_string(),
            assets_dir: PathBuf::from("www/assets"),
            file_paths: FilePathConfig::default(),
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            form: FormServiceConfig::default(),
            faq: FaqServiceConfig::default(),
            system_settings: SystemSettingsConfig::default(),
        }
    }
}

impl SdkConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

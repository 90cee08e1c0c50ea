// src/file_path/mod.rs
//!
//! Well-known base directories
//!
//! Resolves the platform directories (documents, cache, data, external storage)
//! the SDK exports to and reads from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum FilePathError {
    #[error("Unsupported directory: {0}")]
    Unsupported(String),

    #[error("Directory not available on this device: {directory}")]
    Unavailable { directory: FilePaths },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilePaths {
    Documents,
    Cache,
    Data,
    /// Bundled assets live on external storage
    Assets,
}

impl fmt::Display for FilePaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilePaths::Documents => "documents",
            FilePaths::Cache => "cache",
            FilePaths::Data => "data",
            FilePaths::Assets => "assets",
        };
        f.write_str(name)
    }
}

impl FromStr for FilePaths {
    type Err = FilePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "documents" => Ok(FilePaths::Documents),
            "cache" => Ok(FilePaths::Cache),
            "data" => Ok(FilePaths::Data),
            "assets" => Ok(FilePaths::Assets),
            other => Err(FilePathError::Unsupported(other.to_string())),
        }
    }
}

/// Root overrides. Unset roots fall back to the user directories of the OS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilePathConfig {
    pub documents: Option<PathBuf>,
    pub cache: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub external_storage: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct FilePathService {
    config: FilePathConfig,
}

impl FilePathService {
    pub fn new(config: FilePathConfig) -> Self {
        Self { config }
    }

    pub fn get_file_path(&self, directory: FilePaths) -> Result<PathBuf, FilePathError> {
        let resolved = match directory {
            FilePaths::Documents => self.config.documents.clone().or_else(dirs::document_dir),
            FilePaths::Cache => self.config.cache.clone().or_else(dirs::cache_dir),
            FilePaths::Data => self.config.data.clone().or_else(dirs::data_dir),
            FilePaths::Assets => self.config.external_storage.clone().or_else(dirs::home_dir),
        };

        resolved.ok_or_else(|| {
            error!(directory = %directory, "Error getting file path");
            FilePathError::Unavailable { directory }
        })
    }

    /// Roots reported as storage volumes: internal data and, when configured, external storage
    pub fn storage_roots(&self) -> Vec<(String, PathBuf)> {
        let mut roots = Vec::new();
        if let Ok(data) = self.get_file_path(FilePaths::Data) {
            roots.push(("internal".to_string(), data));
        }
        if let Some(external) = &self.config.external_storage {
            roots.push(("external".to_string(), external.clone()));
        }
        roots
    }
}

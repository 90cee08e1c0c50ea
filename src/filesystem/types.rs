// src/filesystem/types.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

// ============================================================================
// Entries
// ============================================================================

/// A file or directory as reported back to the platform layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Entry {
    pub is_file: bool,
    pub is_directory: bool,
    /// Entry name (not full path)
    pub name: String,
    #[ts(type = "string")]
    pub full_path: PathBuf,
    /// `file://` URL, directories end with a slash
    pub native_url: String,
}

/// Directory listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DirEntry {
    pub is_file: bool,
    pub is_directory: bool,
    pub name: String,
    #[ts(type = "string")]
    pub full_path: PathBuf,
    /// Filesystem tag, always "default" for local storage
    pub filesystem: String,
    pub native_url: String,
}

impl DirEntry {
    pub fn to_entry(&self) -> Entry {
        Entry {
            is_file: self.is_file,
            is_directory: self.is_directory,
            name: self.name.clone(),
            full_path: self.full_path.clone(),
            native_url: self.native_url.clone(),
        }
    }
}

/// File/directory metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Metadata {
    /// Last modified time (Unix timestamp in milliseconds)
    pub modification_time: u64,
    /// Size in bytes
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExistsResult {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TempLocation {
    #[ts(type = "string")]
    pub path: PathBuf,
    pub native_url: String,
}

// ============================================================================
// Operation results and options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SuccessResult {
    pub success: bool,
}

impl SuccessResult {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateFileResult {
    pub success: bool,
    #[ts(type = "string")]
    pub path: PathBuf,
    pub native_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WriteOptions {
    /// Overwrite an existing file (default: true)
    #[serde(default = "default_true")]
    pub replace: bool,
    /// Append to an existing file instead of truncating it
    #[serde(default)]
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            replace: true,
            append: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Lookup flags for `get_file`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Flags {
    /// Create the file if it does not exist
    #[serde(default)]
    pub create: bool,
    /// Together with `create`, fail if the file already exists
    #[serde(default)]
    pub exclusive: bool,
}

// ============================================================================
// Storage volumes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageVolumeInfo {
    pub available_size: u64,
    pub total_size: u64,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageVolume {
    /// e.g. "internal" or "external"
    pub storage_destination: String,
    pub info: StorageVolumeInfo,
}

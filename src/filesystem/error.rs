// src/filesystem/error.rs
//!
//! Filesystem Error Types
//!

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Already exists: {path}")]
    AlreadyExists { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error: {reason}")]
    IoError { reason: String },

    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Invalid encoding in '{path}': {reason}")]
    InvalidEncoding { path: String, reason: String },

    #[error("Storage volume error: {reason}")]
    VolumeError { reason: String },
}

impl FsError {
    /// Maps an I/O error to the matching variant, keeping the path that failed.
    pub fn from_io(path: impl Into<String>, e: std::io::Error) -> Self {
        let path = path.into();
        match e.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path },
            _ => FsError::IoError {
                reason: format!("'{}': {}", path, e),
            },
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(e: std::io::Error) -> Self {
        FsError::from_io("unknown", e)
    }
}

impl Serialize for FsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

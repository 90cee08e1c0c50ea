// src/cache/error.rs
//!
//! Cache Error Types
//!

use crate::filesystem::FsError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// Server, cache and bundled file all came up empty
    #[error("No value for '{key}': {reason}")]
    NotFound { key: String, reason: String },

    #[error("Key-value store error: {reason}")]
    Store { reason: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Reading a bundled resource failed
    #[error(transparent)]
    Filesystem(#[from] FsError),
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization {
            reason: e.to_string(),
        }
    }
}

impl Serialize for CacheError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

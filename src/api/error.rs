// src/api/error.rs
//!
//! API Error Types
//!

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {reason}")]
    Network { reason: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Server responded with status {status}")]
    Status { status: u16, body: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Failed to parse response: {reason}")]
    Parse { reason: String },
}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

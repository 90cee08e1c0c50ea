// src/api/mod.rs
//!
//! API Module
//!
//! HTTP access to the content platform. Handlers build an [`ApiRequest`] and
//! hand it to an [`ApiService`].

pub mod error;
pub mod http;
pub mod request;

pub use error::ApiError;
pub use http::HttpApiService;
pub use request::{ApiRequest, ApiRequestBuilder, ApiResponse, HttpRequestType};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// API service trait
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Sends the request. Non-2xx responses are errors.
    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Base URL prepended to request paths
    pub host: String,
    pub api_token: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_token: None,
            timeout_ms: 30000,
        }
    }
}

// src/api/http.rs
//!
//! reqwest backed API service
//!

use crate::api::error::ApiError;
use crate::api::request::{ApiRequest, ApiResponse, HttpRequestType};
use crate::api::{ApiConfig, ApiService};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpApiService {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpApiService {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        // Build reqwest client with timeout
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::InvalidRequest {
                reason: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url_for(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let host = request.host.as_deref().unwrap_or(&self.config.host);
        if host.is_empty() {
            return Err(ApiError::InvalidRequest {
                reason: format!("No host configured for '{}'", request.path),
            });
        }

        let host = host.trim_end_matches('/');
        if request.path.is_empty() || request.path.starts_with('/') {
            Ok(format!("{}{}", host, request.path))
        } else {
            Ok(format!("{}/{}", host, request.path))
        }
    }
}

#[async_trait]
impl ApiService for HttpApiService {
    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request)?;
        debug!(url = %url, method = ?request.request_type, "API request");

        let mut req_builder = match request.request_type {
            HttpRequestType::Get => self.client.get(&url),
            HttpRequestType::Post => self.client.post(&url),
        };

        if request.with_bearer_token {
            match &self.config.api_token {
                Some(token) => req_builder = req_builder.bearer_auth(token),
                None => warn!(url = %url, "Bearer token requested but none configured"),
            }
        }

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let timeout_ms = self.config.timeout_ms;
        let response = req_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout { timeout_ms }
            } else {
                ApiError::Network {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout { timeout_ms }
            } else {
                ApiError::Network {
                    reason: format!("Failed to read response body: {}", e),
                }
            }
        })?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

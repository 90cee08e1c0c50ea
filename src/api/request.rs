// src/api/request.rs
//!
//! Request and response types for the API service
//!

use crate::api::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpRequestType {
    #[default]
    Get,
    Post,
}

/// Outgoing request. Build with [`ApiRequest::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub request_type: HttpRequestType,
    /// Overrides the configured host
    pub host: Option<String>,
    pub path: String,
    pub with_bearer_token: bool,
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn builder() -> ApiRequestBuilder {
        ApiRequestBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ApiRequestBuilder {
    request_type: HttpRequestType,
    host: Option<String>,
    path: String,
    with_bearer_token: bool,
    headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
}

impl ApiRequestBuilder {
    pub fn with_type(mut self, request_type: HttpRequestType) -> Self {
        self.request_type = request_type;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_bearer_token(mut self, with_bearer_token: bool) -> Self {
        self.with_bearer_token = with_bearer_token;
        self
    }

    /// Adds to the headers set so far
    pub fn with_headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> ApiRequest {
        ApiRequest {
            request_type: self.request_type,
            host: self.host,
            path: self.path,
            with_bearer_token: self.with_bearer_token,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Parse {
            reason: e.to_string(),
        })
    }
}

// src/system_settings/handler.rs

use crate::api::{ApiError, ApiRequest, ApiService, HttpRequestType};
use crate::cache::{CacheError, CachedItemStore};
use crate::config::Platform;
use crate::filesystem::path::asset_path;
use crate::filesystem::FileService;
use crate::system_settings::{GetSystemSettingsRequest, SystemSettings, SystemSettingsConfig};
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

const SYSTEM_SETTINGS_FILE_KEY_PREFIX: &str = "system-setting-";
const SYSTEM_SETTINGS_LOCAL_KEY: &str = "system-settings-";
const GET_SYSTEM_SETTINGS_ENDPOINT: &str = "/system/settings/get";

pub struct GetSystemSettingsHandler {
    api_service: Arc<dyn ApiService>,
    config: SystemSettingsConfig,
    file_service: Arc<dyn FileService>,
    cached_item_store: Arc<CachedItemStore>,
    platform: Platform,
}

/// Settings sit under `result.response` both on the wire and in bundled files
fn take_response(mut document: Value) -> Option<Result<SystemSettings, serde_json::Error>> {
    document
        .pointer_mut("/result/response")
        .map(Value::take)
        .map(serde_json::from_value)
}

impl GetSystemSettingsHandler {
    pub fn new(
        api_service: Arc<dyn ApiService>,
        config: SystemSettingsConfig,
        file_service: Arc<dyn FileService>,
        cached_item_store: Arc<CachedItemStore>,
        platform: Platform,
    ) -> Self {
        Self {
            api_service,
            config,
            file_service,
            cached_item_store,
            platform,
        }
    }

    pub async fn handle(
        &self,
        request: &GetSystemSettingsRequest,
    ) -> Result<SystemSettings, CacheError> {
        self.cached_item_store
            .get_cached(
                &request.id,
                SYSTEM_SETTINGS_LOCAL_KEY,
                &format!("ttl_{}", SYSTEM_SETTINGS_LOCAL_KEY),
                || self.fetch_from_server(request),
                || self.fetch_from_file(request),
            )
            .await
    }

    async fn fetch_from_server(
        &self,
        request: &GetSystemSettingsRequest,
    ) -> Result<SystemSettings, ApiError> {
        let api_request = ApiRequest::builder()
            .with_type(HttpRequestType::Get)
            .with_path(format!(
                "{}{}/{}",
                self.config.system_settings_api_path, GET_SYSTEM_SETTINGS_ENDPOINT, request.id
            ))
            .with_bearer_token(true)
            .build();

        let body: Value = self.api_service.fetch(api_request).await?.json()?;
        match take_response(body) {
            Some(settings) => settings.map_err(|e| ApiError::Parse {
                reason: e.to_string(),
            }),
            None => Err(ApiError::Parse {
                reason: format!("System settings '{}' missing from response", request.id),
            }),
        }
    }

    async fn fetch_from_file(
        &self,
        request: &GetSystemSettingsRequest,
    ) -> Result<SystemSettings, CacheError> {
        let dir = format!(
            "{}{}",
            asset_path(self.platform),
            self.config.system_settings_dir_path
        );
        let file_path = format!("{}/{}{}.json", dir, SYSTEM_SETTINGS_FILE_KEY_PREFIX, request.id);

        let result: Result<SystemSettings, CacheError> = async {
            let content = self.file_service.read_file_from_assets(&file_path).await?;
            let document: Value = serde_json::from_str(&content)?;
            match take_response(document) {
                Some(settings) => Ok(settings?),
                None => Err(CacheError::Serialization {
                    reason: format!("'{}' has no result.response", file_path),
                }),
            }
        }
        .await;

        if let Err(e) = &result {
            error!(path = %file_path, error = %e, "Error fetching system settings from file");
        }
        result
    }
}

// src/faq/handler.rs
//!
//! FAQ lookup per language
//!

use crate::api::{ApiError, ApiRequest, ApiService, HttpRequestType};
use crate::cache::{CacheError, CachedItemStore};
use crate::config::Platform;
use crate::faq::{Faq, FaqServiceConfig, GetFaqRequest};
use crate::filesystem::path::asset_path;
use crate::filesystem::FileService;
use std::sync::Arc;
use tracing::error;

const FAQ_FILE_KEY_PREFIX: &str = "faq-";
const FAQ_LOCAL_KEY: &str = "faq-new-";

pub struct GetFaqDetailsHandler {
    api_service: Arc<dyn ApiService>,
    config: FaqServiceConfig,
    file_service: Arc<dyn FileService>,
    cached_item_store: Arc<CachedItemStore>,
    platform: Platform,
}

impl GetFaqDetailsHandler {
    pub fn new(
        api_service: Arc<dyn ApiService>,
        config: FaqServiceConfig,
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

    pub async fn handle(&self, request: &GetFaqRequest) -> Result<Faq, CacheError> {
        self.cached_item_store
            .get_cached(
                &request.language,
                FAQ_LOCAL_KEY,
                &format!("ttl_{}", FAQ_LOCAL_KEY),
                || self.fetch_from_server(request),
                || self.fetch_from_file(&request.language),
            )
            .await
    }

    async fn fetch_from_server(&self, request: &GetFaqRequest) -> Result<Faq, ApiError> {
        let api_request = ApiRequest::builder()
            .with_type(HttpRequestType::Get)
            .with_host(request.faq_url.as_str())
            .with_path(format!("/faq-{}.json", request.language))
            .with_bearer_token(false)
            .build();

        let response = self.api_service.fetch(api_request).await?;

        // Some hosts serve the document as plain text
        Ok(serde_json::from_str(response.body.trim())
            .unwrap_or(serde_json::Value::String(response.body)))
    }

    async fn fetch_from_file(&self, language: &str) -> Result<Faq, CacheError> {
        let dir = format!(
            "{}{}",
            asset_path(self.platform),
            self.config.faq_config_dir_path
        );
        let file_path = format!("{}/{}{}.json", dir, FAQ_FILE_KEY_PREFIX, language);

        let result: Result<Faq, CacheError> = async {
            let content = self.file_service.read_file_from_assets(&file_path).await?;
            Ok(serde_json::from_str(&content)?)
        }
        .await;

        if let Err(e) = &result {
            error!(path = %file_path, error = %e, "Error fetching FAQ from file");
        }
        result
    }
}

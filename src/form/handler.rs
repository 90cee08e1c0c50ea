// src/form/handler.rs
//!
//! Form definition lookup: server, cache and bundled fallback
//!

use crate::api::{ApiError, ApiRequest, ApiService, HttpRequestType};
use crate::cache::{CacheError, CachedItemRequestSourceFrom, CachedItemStore};
use crate::config::Platform;
use crate::filesystem::path::asset_path;
use crate::filesystem::FileService;
use crate::form::types::{FormRequest, FormServiceConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

const FORM_FILE_KEY_PREFIX: &str = "form-";
const FORM_LOCAL_KEY: &str = "form-";
const GET_FORM_DETAILS_ENDPOINT: &str = "/read";

pub struct GetFormHandler {
    api_service: Arc<dyn ApiService>,
    config: FormServiceConfig,
    file_service: Arc<dyn FileService>,
    cached_item_store: Arc<CachedItemStore>,
    platform: Platform,
}

fn is_set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl GetFormHandler {
    pub fn new(
        api_service: Arc<dyn ApiService>,
        config: FormServiceConfig,
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

    /// `type_subType_action`, then root org (unless `*`), framework and component when set
    pub fn id_for_request(request: &FormRequest) -> String {
        let mut id = format!(
            "{}_{}_{}",
            request.form_type, request.sub_type, request.action
        );

        if let Some(root_org_id) = is_set(&request.root_org_id).filter(|v| *v != "*") {
            id.push('_');
            id.push_str(root_org_id);
        }
        if let Some(framework) = is_set(&request.framework) {
            id.push('_');
            id.push_str(framework);
        }
        if let Some(component) = is_set(&request.component) {
            id.push('_');
            id.push_str(component);
        }

        id
    }

    pub async fn handle(&self, request: &FormRequest) -> Result<Value, CacheError> {
        let id = Self::id_for_request(request);
        let ttl_key = format!("ttl_{}", FORM_LOCAL_KEY);
        let server = || self.fetch_from_server(request);
        let file = || self.fetch_from_file(&id);

        match request.from {
            CachedItemRequestSourceFrom::Server => {
                self.cached_item_store
                    .get(&id, FORM_LOCAL_KEY, &ttl_key, server, file)
                    .await
            }
            CachedItemRequestSourceFrom::Cache => {
                self.cached_item_store
                    .get_cached(&id, FORM_LOCAL_KEY, &ttl_key, server, file)
                    .await
            }
        }
    }

    async fn fetch_from_server(&self, request: &FormRequest) -> Result<Value, ApiError> {
        let api_request = ApiRequest::builder()
            .with_type(HttpRequestType::Post)
            .with_path(format!("{}{}", self.config.api_path, GET_FORM_DETAILS_ENDPOINT))
            .with_bearer_token(true)
            .with_headers([("X-Platform-Id", self.platform.as_str())])
            .with_body(json!({ "request": request }))
            .build();

        let mut body: Value = self.api_service.fetch(api_request).await?.json()?;
        body.pointer_mut("/result")
            .map(Value::take)
            .ok_or_else(|| ApiError::Parse {
                reason: "Form response has no result".to_string(),
            })
    }

    async fn fetch_from_file(&self, id: &str) -> Result<Value, CacheError> {
        let dir = format!(
            "{}{}",
            asset_path(self.platform),
            self.config.form_config_dir_path
        );
        let file_path = format!("{}/{}{}.json", dir, FORM_FILE_KEY_PREFIX, id);

        let result: Result<Value, CacheError> = async {
            let content = self.file_service.read_file_from_assets(&file_path).await?;
            let mut json: Value = serde_json::from_str(&content)?;
            json.pointer_mut("/result")
                .map(Value::take)
                .ok_or_else(|| CacheError::Serialization {
                    reason: format!("'{}' has no result", file_path),
                })
        }
        .await;

        if let Err(e) = &result {
            error!(path = %file_path, error = %e, "Error fetching form from file");
        }
        result
    }
}

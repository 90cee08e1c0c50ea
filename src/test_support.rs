// src/test_support.rs
//!
//! Shared fakes for the handler and content tests
//!

use crate::api::{ApiError, ApiRequest, ApiResponse, ApiService};
use crate::cache::{CacheConfig, CachedItemStore, InMemoryKeyValueStore};
use crate::filesystem::{LocalDeviceInfo, LocalFileService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Answers requests from a queue and records what it was sent
#[derive(Default)]
pub struct FakeApiService {
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeApiService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail_with(self, error: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiService for FakeApiService {
    async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Network {
                    reason: "offline".to_string(),
                })
            })
    }
}

pub fn offline() -> ApiError {
    ApiError::Network {
        reason: "offline".to_string(),
    }
}

/// File service rooted at `root`, with bundled assets under `root/assets`
pub fn local_files(root: &Path) -> Arc<LocalFileService> {
    let device = LocalDeviceInfo::new().with_volume("internal", root.to_path_buf());
    Arc::new(LocalFileService::new(root.join("assets"), Arc::new(device)))
}

pub fn memory_cache() -> Arc<CachedItemStore> {
    Arc::new(CachedItemStore::new(
        Arc::new(InMemoryKeyValueStore::new()),
        CacheConfig::default(),
    ))
}

/// Writes a bundled asset at `root/assets/relative`
pub fn write_asset(root: &Path, relative: &str, content: &str) {
    let path = root.join("assets").join(relative.trim_start_matches('/'));
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

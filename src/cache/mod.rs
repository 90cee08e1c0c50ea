// src/cache/mod.rs
//!
//! Cache Module
//!
//! Key-value storage for remote JSON resources (forms, FAQs, system settings)
//! with time-to-live handling and bundled-file fallback.

pub mod cached_item_store;
pub mod error;
pub mod store;
#[cfg(test)]
mod tests;

pub use cached_item_store::{CachedItemRequestSourceFrom, CachedItemStore};
pub use error::CacheError;
pub use store::{InMemoryKeyValueStore, JsonFileKeyValueStore, KeyValueStore};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// One hour
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheConfig {
    pub default_ttl_ms: u64,
    /// TTL per ttl key, e.g. `"ttl_form-"`
    pub ttl_overrides: HashMap<String, u64>,
    /// JSON file backing the store. In-memory when unset.
    pub store_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS,
            ttl_overrides: HashMap::new(),
            store_path: None,
        }
    }
}

/// Opens the store described by the config
pub async fn open_store(config: &CacheConfig) -> Result<Arc<dyn KeyValueStore>, CacheError> {
    match &config.store_path {
        Some(path) => Ok(Arc::new(JsonFileKeyValueStore::open(path.clone()).await?)),
        None => Ok(Arc::new(InMemoryKeyValueStore::new())),
    }
}

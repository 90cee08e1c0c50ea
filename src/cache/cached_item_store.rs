// src/cache/cached_item_store.rs
//!
//! Cached remote resources with a time-to-live
//!
//! A resource is stored as JSON under `{no_sql_key}{id}`. The save time in
//! milliseconds since the epoch sits next to it under `{ttl_key}{id}`.

use crate::cache::error::CacheError;
use crate::cache::store::KeyValueStore;
use crate::cache::CacheConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Where a request wants its data to come from first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachedItemRequestSourceFrom {
    #[default]
    Cache,
    Server,
}

pub struct CachedItemStore {
    store: Arc<dyn KeyValueStore>,
    config: CacheConfig,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl CachedItemStore {
    pub fn new(store: Arc<dyn KeyValueStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// TTL in milliseconds for entries stored under `ttl_key`
    pub fn ttl_for(&self, ttl_key: &str) -> u64 {
        self.config
            .ttl_overrides
            .get(ttl_key)
            .copied()
            .unwrap_or(self.config.default_ttl_ms)
    }

    /// Cache first: a fresh entry wins, then the server, then a stale entry,
    /// then the bundled file.
    pub async fn get_cached<T, S, SFut, SErr, F, FFut, FErr>(
        &self,
        id: &str,
        no_sql_key: &str,
        ttl_key: &str,
        server_fetch: S,
        file_fetch: F,
    ) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned + Send,
        S: FnOnce() -> SFut + Send,
        SFut: Future<Output = Result<T, SErr>> + Send,
        SErr: Display,
        F: FnOnce() -> FFut + Send,
        FFut: Future<Output = Result<T, FErr>> + Send,
        FErr: Display,
    {
        let mut stale = None;
        if let Some((value, saved_at)) = self.read_entry::<T>(id, no_sql_key, ttl_key).await {
            if self.is_fresh(ttl_key, saved_at) {
                debug!(key = %no_sql_key, id = %id, "Cache hit");
                return Ok(value);
            }
            debug!(key = %no_sql_key, id = %id, "Cache entry expired");
            stale = Some(value);
        }

        match server_fetch().await {
            Ok(value) => {
                self.save(id, no_sql_key, ttl_key, &value, now_millis()).await;
                return Ok(value);
            }
            Err(e) => {
                warn!(key = %no_sql_key, id = %id, error = %e, "Server fetch failed");
            }
        }

        if let Some(value) = stale {
            info!(key = %no_sql_key, id = %id, "Serving expired cache entry");
            return Ok(value);
        }

        self.from_file(id, no_sql_key, ttl_key, file_fetch).await
    }

    /// Server first: used when the request explicitly asks for fresh data.
    /// Falls back to any cached entry, then the bundled file.
    pub async fn get<T, S, SFut, SErr, F, FFut, FErr>(
        &self,
        id: &str,
        no_sql_key: &str,
        ttl_key: &str,
        server_fetch: S,
        file_fetch: F,
    ) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned + Send,
        S: FnOnce() -> SFut + Send,
        SFut: Future<Output = Result<T, SErr>> + Send,
        SErr: Display,
        F: FnOnce() -> FFut + Send,
        FFut: Future<Output = Result<T, FErr>> + Send,
        FErr: Display,
    {
        match server_fetch().await {
            Ok(value) => {
                self.save(id, no_sql_key, ttl_key, &value, now_millis()).await;
                return Ok(value);
            }
            Err(e) => {
                warn!(key = %no_sql_key, id = %id, error = %e, "Server fetch failed");
            }
        }

        if let Some((value, _)) = self.read_entry::<T>(id, no_sql_key, ttl_key).await {
            info!(key = %no_sql_key, id = %id, "Serving cached entry");
            return Ok(value);
        }

        self.from_file(id, no_sql_key, ttl_key, file_fetch).await
    }

    async fn from_file<T, F, FFut, FErr>(
        &self,
        id: &str,
        no_sql_key: &str,
        ttl_key: &str,
        file_fetch: F,
    ) -> Result<T, CacheError>
    where
        T: Serialize + Send,
        F: FnOnce() -> FFut + Send,
        FFut: Future<Output = Result<T, FErr>> + Send,
        FErr: Display,
    {
        match file_fetch().await {
            Ok(value) => {
                // Saved as already expired so the next read retries the server
                self.save(id, no_sql_key, ttl_key, &value, 0).await;
                Ok(value)
            }
            Err(e) => {
                warn!(key = %no_sql_key, id = %id, error = %e, "Bundled file fetch failed");
                Err(CacheError::NotFound {
                    key: format!("{no_sql_key}{id}"),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn is_fresh(&self, ttl_key: &str, saved_at: u64) -> bool {
        now_millis().saturating_sub(saved_at) < self.ttl_for(ttl_key)
    }

    /// Cached value plus its save time. Unreadable entries count as missing.
    async fn read_entry<T: DeserializeOwned>(
        &self,
        id: &str,
        no_sql_key: &str,
        ttl_key: &str,
    ) -> Option<(T, u64)> {
        let value_key = format!("{no_sql_key}{id}");
        let raw = match self.store.get_value(&value_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %value_key, error = %e, "Error reading cache entry");
                return None;
            }
        };

        let value = match serde_json::from_str::<T>(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %value_key, error = %e, "Discarding unreadable cache entry");
                return None;
            }
        };

        let saved_at = match self.store.get_value(&format!("{ttl_key}{id}")).await {
            Ok(Some(stamp)) => stamp.trim().parse().unwrap_or(0),
            _ => 0,
        };

        Some((value, saved_at))
    }

    /// Persists a value. Empty values are skipped and store failures only logged.
    async fn save<T: Serialize>(
        &self,
        id: &str,
        no_sql_key: &str,
        ttl_key: &str,
        value: &T,
        saved_at: u64,
    ) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %no_sql_key, id = %id, error = %e, "Cannot serialize value for cache");
                return;
            }
        };

        if is_empty_value(&json) {
            debug!(key = %no_sql_key, id = %id, "Empty result, not caching");
            return;
        }

        let value_key = format!("{no_sql_key}{id}");
        let result: Result<(), CacheError> = async {
            self.store.set_value(&value_key, &json.to_string()).await?;
            self.store
                .set_value(&format!("{ttl_key}{id}"), &saved_at.to_string())
                .await
        }
        .await;

        if let Err(e) = result {
            warn!(key = %value_key, error = %e, "Error saving cache entry");
        }
    }
}

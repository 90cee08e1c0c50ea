// src/cache/store.rs
//!
//! Key-value stores backing the cached item store.
//!

use crate::cache::error::CacheError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// String key-value store
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_value(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_value(&self, key: &str, value: &str) -> Result<(), CacheError>;
}

/// Process-local store, lost on restart
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every write replaces the file through a temp file in the same directory,
/// so readers never observe a half written map.
#[derive(Debug)]
pub struct JsonFileKeyValueStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileKeyValueStore {
    /// Loads the map from `path`. A missing file starts an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Key-value file missing, starting empty");
                HashMap::new()
            }
            Err(e) => {
                return Err(CacheError::Store {
                    reason: format!("Failed to read '{}': {}", path.display(), e),
                })
            }
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(path: &Path, content: &str) -> Result<(), CacheError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let store_error = |e: std::io::Error| CacheError::Store {
            reason: format!("Failed to write '{}': {}", path.display(), e),
        };

        std::fs::create_dir_all(&dir).map_err(store_error)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir).map_err(store_error)?;
        temp.write_all(content.as_bytes()).map_err(store_error)?;
        temp.as_file().sync_all().map_err(store_error)?;
        temp.persist(path).map_err(|e| store_error(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get_value(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: &str) -> Result<(), CacheError> {
        // Held across the write so concurrent saves land on disk in order
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string(&*entries)?;

        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || Self::persist(&path, &content))
            .await
            .map_err(|e| CacheError::Store {
                reason: format!("Write task failed: {}", e),
            })
            .and_then(|result| result);

        if written.is_err() {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
        }
        written
    }
}

// src/filesystem/device.rs
//!
//! Storage volume reporting used for free disk space queries.
//!

use crate::filesystem::error::FsError;
use crate::filesystem::types::{StorageVolume, StorageVolumeInfo};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

/// Source of the storage volumes the SDK may write to.
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait DeviceInfo: Send + Sync {
    async fn storage_volumes(&self) -> Result<Vec<StorageVolume>, FsError>;
}

/// Reports one volume per configured root directory
#[derive(Debug, Clone, Default)]
pub struct LocalDeviceInfo {
    roots: Vec<(String, PathBuf)>,
}

impl LocalDeviceInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume(mut self, storage_destination: impl Into<String>, root: PathBuf) -> Self {
        self.roots.push((storage_destination.into(), root));
        self
    }
}

fn query_volume(storage_destination: String, path: PathBuf) -> Result<StorageVolume, FsError> {
    let query_error = |e: std::io::Error| FsError::VolumeError {
        reason: format!("Failed to query '{}': {}", path.display(), e),
    };
    let available_size = fs2::available_space(&path).map_err(query_error)?;
    let total_size = fs2::total_space(&path).map_err(query_error)?;

    Ok(StorageVolume {
        storage_destination,
        info: StorageVolumeInfo {
            available_size,
            total_size,
            path,
        },
    })
}

#[async_trait]
impl DeviceInfo for LocalDeviceInfo {
    /// Skips volumes that cannot be queried (an unmounted card, say). Fails only
    /// when none of the configured roots answers.
    async fn storage_volumes(&self) -> Result<Vec<StorageVolume>, FsError> {
        let roots = self.roots.clone();

        tokio::task::spawn_blocking(move || {
            let mut volumes = Vec::new();
            let mut last_error = None;

            for (storage_destination, path) in roots {
                match query_volume(storage_destination, path) {
                    Ok(volume) => volumes.push(volume),
                    Err(e) => {
                        warn!(error = %e, "Skipping storage volume");
                        last_error = Some(e);
                    }
                }
            }

            match last_error {
                Some(e) if volumes.is_empty() => Err(e),
                _ => Ok(volumes),
            }
        })
        .await
        .map_err(|e| FsError::VolumeError {
            reason: format!("Volume query task failed: {}", e),
        })?
    }
}

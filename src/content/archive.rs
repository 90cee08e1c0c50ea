// src/content/archive.rs
//!
//! ECAR extraction

use crate::filesystem::FsError;
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Zip extraction service
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait ZipService: Send + Sync {
    /// Extracts every entry of `source` below `target`
    async fn unzip(&self, source: &Path, target: &Path) -> Result<(), FsError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveService;

impl ZipArchiveService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ZipService for ZipArchiveService {
    async fn unzip(&self, source: &Path, target: &Path) -> Result<(), FsError> {
        let source: PathBuf = source.to_path_buf();
        let target: PathBuf = target.to_path_buf();

        tokio::task::spawn_blocking(move || {
            let file = File::open(&source).map_err(|e| FsError::from_io(source.to_string_lossy(), e))?;

            let mut archive = ZipArchive::new(file).map_err(|e| FsError::IoError {
                reason: format!("Invalid archive '{}': {}", source.display(), e),
            })?;

            // Entry names escaping the target are rejected by the zip crate
            archive.extract(&target).map_err(|e| FsError::IoError {
                reason: format!("Cannot extract archive '{}': {}", source.display(), e),
            })?;

            debug!(
                source = %source.display(),
                target = %target.display(),
                entries = archive.len(),
                "Archive extracted"
            );
            Ok(())
        })
        .await
        .map_err(|e| FsError::IoError {
            reason: format!("Extraction task failed: {}", e),
        })?
    }
}

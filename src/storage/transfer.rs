// src/storage/transfer.rs
//!
//! Content transfer steps
//!

use crate::filesystem::{FileService, FsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};
use ts_rs::TS;

const CONTENT_DIR: &str = "content";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Destination is not writable")]
    NotWritable { path: String },

    #[error(transparent)]
    Filesystem(#[from] FsError),
}

impl Serialize for TransferError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransferContentContext {
    #[ts(type = "string")]
    pub destination_folder: PathBuf,
    #[serde(default)]
    pub content_ids: Vec<String>,
}

/// Makes sure the destination can take the content store and points the
/// context at its `content` dir, creating it when missing.
pub struct ValidateDestinationFolder {
    file_service: Arc<dyn FileService>,
}

async fn can_write(directory: &Path) -> Result<(), std::io::Error> {
    let directory = directory.to_path_buf();
    tokio::task::spawn_blocking(move || tempfile::tempfile_in(&directory).map(|_| ()))
        .await
        .map_err(std::io::Error::other)?
}

impl ValidateDestinationFolder {
    pub fn new(file_service: Arc<dyn FileService>) -> Self {
        Self { file_service }
    }

    pub async fn execute(
        &self,
        mut context: TransferContentContext,
    ) -> Result<TransferContentContext, TransferError> {
        let destination = self.validate(&context.destination_folder).await?;
        context.destination_folder = self.create_directory(&destination).await?;
        Ok(context)
    }

    async fn validate(&self, destination: &Path) -> Result<PathBuf, TransferError> {
        if let Err(e) = can_write(destination).await {
            error!(path = %destination.display(), error = %e, "Destination is not writable");
            return Err(TransferError::NotWritable {
                path: destination.display().to_string(),
            });
        }

        if destination.file_name().is_some_and(|name| name == CONTENT_DIR) {
            Ok(destination.to_path_buf())
        } else {
            Ok(destination.join(CONTENT_DIR))
        }
    }

    async fn create_directory(&self, directory: &Path) -> Result<PathBuf, TransferError> {
        let path = directory.to_string_lossy();

        if self.file_service.exists(&path).await?.exists {
            debug!(path = %path, "Destination content dir exists");
            return Ok(directory.to_path_buf());
        }

        let entry = self.file_service.create_dir(&path, false).await?;
        Ok(entry.full_path)
    }
}

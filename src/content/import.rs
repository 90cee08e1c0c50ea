// src/content/import.rs
//!
//! Import steps: ECAR extraction and cleanup of the extraction dir
//!

use crate::content::archive::ZipService;
use crate::content::error::ContentError;
use crate::content::types::{ImportContentContext, FILE_SIZE};
use crate::filesystem::path::join;
use crate::filesystem::{FileService, FsError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Unzips the ECAR into a fresh directory below the context's temp location
pub struct ExtractEcar {
    file_service: Arc<dyn FileService>,
    zip_service: Arc<dyn ZipService>,
}

impl ExtractEcar {
    pub fn new(file_service: Arc<dyn FileService>, zip_service: Arc<dyn ZipService>) -> Self {
        Self {
            file_service,
            zip_service,
        }
    }

    pub async fn execute(
        &self,
        mut context: ImportContentContext,
    ) -> Result<ImportContentContext, ContentError> {
        let ecar = context.ecar_file_path.to_string_lossy().to_string();

        let result: Result<(PathBuf, u64), FsError> = async {
            let size = self.file_service.get_metadata(&ecar).await?.size;

            let target = join(
                &context.tmp_location.to_string_lossy(),
                &Uuid::new_v4().to_string(),
            );
            let directory = self.file_service.create_dir(&target, true).await?;

            if let Err(e) = self
                .zip_service
                .unzip(&context.ecar_file_path, &directory.full_path)
                .await
            {
                if let Err(cleanup) = self.file_service.remove_recursively(&target).await {
                    warn!(path = %target, error = %cleanup, "Failed to remove partial extraction dir");
                }
                return Err(e);
            }
            Ok((directory.full_path, size))
        }
        .await;

        match result {
            Ok((extracted, size)) => {
                info!(ecar = %ecar, target = %extracted.display(), size, "ECAR extracted");
                context.tmp_location = extracted;
                context.metadata.insert(FILE_SIZE.to_string(), size.into());
                Ok(context)
            }
            Err(e) => {
                error!(ecar = %ecar, error = %e, "Error extracting ECAR");
                Err(ContentError::ExtractEcar {
                    path: ecar,
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Removes the extraction dir left by [`ExtractEcar`]
pub struct EcarCleanup {
    file_service: Arc<dyn FileService>,
}

impl EcarCleanup {
    pub fn new(file_service: Arc<dyn FileService>) -> Self {
        Self { file_service }
    }

    pub async fn execute(
        &self,
        context: ImportContentContext,
    ) -> Result<ImportContentContext, ContentError> {
        let tmp = context.tmp_location.to_string_lossy().to_string();

        match self.file_service.remove_recursively(&tmp).await {
            Ok(_) => Ok(context),
            Err(e) => Err(ContentError::Cleanup {
                path: tmp,
                reason: e.to_string(),
            }),
        }
    }
}

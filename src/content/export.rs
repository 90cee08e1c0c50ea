// src/content/export.rs
//!
//! Export steps: temp dir creation, copying the ECAR out and share telemetry
//!

use crate::config::Platform;
use crate::content::error::ContentError;
use crate::content::telemetry::{
    ShareDirection, ShareItem, ShareItemType, ShareType, TelemetryService, TelemetryShareRequest,
};
use crate::content::types::{ContentExportRequest, ContentExportResponse, ExportContentContext};
use crate::content::util;
use crate::file_path::{FilePathError, FilePathService, FilePaths};
use crate::filesystem::path::{dir_path_from_file_path, file_name_from_file_path, join};
use crate::filesystem::FileService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Exports land in Documents on iOS and in the cache dir elsewhere
pub fn platform_export_folder(
    platform: Platform,
    file_paths: &FilePathService,
) -> Result<PathBuf, FilePathError> {
    let directory = match platform {
        Platform::Ios => FilePaths::Documents,
        Platform::Android => FilePaths::Cache,
    };
    file_paths.get_file_path(directory)
}

fn destination_folder(
    request: &ContentExportRequest,
    platform: Platform,
    file_paths: &FilePathService,
) -> Result<PathBuf, FilePathError> {
    if request.save_locally {
        Ok(request.destination_folder.clone())
    } else {
        platform_export_folder(platform, file_paths)
    }
}

pub struct CreateTempLoc {
    file_service: Arc<dyn FileService>,
}

impl CreateTempLoc {
    pub fn new(file_service: Arc<dyn FileService>) -> Self {
        Self { file_service }
    }

    /// Moves `tmp_location_path` to a new uniquely named dir below it
    pub async fn execute(
        &self,
        mut context: ExportContentContext,
    ) -> Result<ExportContentContext, ContentError> {
        let parent = context.tmp_location_path.to_string_lossy().to_string();
        let target = join(&parent, &Uuid::new_v4().to_string());

        match self.file_service.create_dir(&target, false).await {
            Ok(directory) => {
                context.tmp_location_path = directory.full_path;
                Ok(context)
            }
            Err(e) => Err(ContentError::CreateTempLocation {
                path: parent,
                reason: e.to_string(),
            }),
        }
    }
}

pub struct CopyToDestination {
    file_service: Arc<dyn FileService>,
    file_paths: Arc<FilePathService>,
    platform: Platform,
}

impl CopyToDestination {
    pub fn new(
        file_service: Arc<dyn FileService>,
        file_paths: Arc<FilePathService>,
        platform: Platform,
    ) -> Self {
        Self {
            file_service,
            file_paths,
            platform,
        }
    }

    /// Copies the ECAR into the destination folder, keeping its file name
    pub async fn execute(
        &self,
        context: ExportContentContext,
        request: &ContentExportRequest,
    ) -> Result<ExportContentContext, ContentError> {
        let ecar = context.ecar_file_path.to_string_lossy().to_string();
        let fail = |reason: String| {
            error!(ecar = %ecar, error = %reason, "Error copying ECAR to destination");
            ContentError::CopyToDestination {
                path: ecar.clone(),
                reason,
            }
        };

        let destination = destination_folder(request, self.platform, &self.file_paths)
            .map_err(|e| fail(e.to_string()))?;
        let file_name = file_name_from_file_path(&ecar);

        self.file_service
            .copy_file(
                &dir_path_from_file_path(&ecar),
                &file_name,
                &destination.to_string_lossy(),
                &file_name,
            )
            .await
            .map_err(|e| fail(e.to_string()))?;

        info!(ecar = %ecar, destination = %destination.display(), "ECAR copied");
        Ok(context)
    }
}

pub struct GenerateExportShareTelemetry {
    telemetry_service: Arc<dyn TelemetryService>,
    file_paths: Arc<FilePathService>,
    platform: Platform,
}

impl GenerateExportShareTelemetry {
    pub fn new(
        telemetry_service: Arc<dyn TelemetryService>,
        file_paths: Arc<FilePathService>,
        platform: Platform,
    ) -> Self {
        Self {
            telemetry_service,
            file_paths,
            platform,
        }
    }

    pub fn share_items(context: &ExportContentContext) -> Vec<ShareItem> {
        context
            .items
            .iter()
            .map(|content| ShareItem {
                item_type: ShareItemType::Content,
                origin: util::read_origin(content),
                identifier: util::read_identifier(content),
                pkg_version: util::read_pkg_version(content),
                transfer_count: util::read_transfer_count(content),
                size: util::read_size(content),
            })
            .collect()
    }

    /// Sends one share event covering every exported item and answers the exported file path
    pub async fn execute(
        &self,
        context: &ExportContentContext,
        file_name: &str,
        request: &ContentExportRequest,
    ) -> Result<ContentExportResponse, ContentError> {
        let share = TelemetryShareRequest {
            dir: ShareDirection::Out,
            share_type: ShareType::File,
            items: Self::share_items(context),
            env: "sdk".to_string(),
        };

        self.telemetry_service
            .share(&share)
            .await
            .map_err(|e| ContentError::Telemetry {
                reason: e.to_string(),
            })?;

        let folder = destination_folder(request, self.platform, &self.file_paths).map_err(|e| {
            ContentError::Telemetry {
                reason: e.to_string(),
            }
        })?;

        Ok(ContentExportResponse {
            exported_file_path: folder.join(file_name),
        })
    }
}

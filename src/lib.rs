pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod faq;
pub mod file_path;
pub mod filesystem;
pub mod form;
pub mod logging;
pub mod storage;
pub mod system_settings;
#[cfg(test)]
mod test_support;

use crate::api::{ApiError, ApiService, HttpApiService};
use crate::cache::{CacheError, CachedItemStore, KeyValueStore};
use crate::config::SdkConfig;
use crate::content::{
    ContentError, ContentExportRequest, ContentExportResponse, CopyToDestination, CreateTempLoc,
    EcarCleanup, ExportContentContext, ExtractEcar, GenerateExportShareTelemetry,
    ImportContentContext, LoggingTelemetryService, TelemetryService, ZipArchiveService, ZipService,
};
use crate::faq::{Faq, GetFaqDetailsHandler, GetFaqRequest};
use crate::file_path::FilePathService;
use crate::filesystem::{FileService, LocalDeviceInfo, LocalFileService};
use crate::form::{FormRequest, GetFormHandler};
use crate::storage::{TransferContentContext, TransferError, ValidateDestinationFolder};
use crate::system_settings::{GetSystemSettingsHandler, GetSystemSettingsRequest, SystemSettings};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use crate::config::Platform;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Services the SDK hands out, wired from one [`SdkConfig`]
pub struct ContentSdk {
    config: SdkConfig,
    file_paths: Arc<FilePathService>,
    file_service: Arc<dyn FileService>,
    zip_service: Arc<dyn ZipService>,
    telemetry_service: Arc<dyn TelemetryService>,
    cached_item_store: Arc<CachedItemStore>,
    form_handler: GetFormHandler,
    faq_handler: GetFaqDetailsHandler,
    system_settings_handler: GetSystemSettingsHandler,
}

impl ContentSdk {
    /// Local filesystem, reqwest and the configured key-value store
    pub async fn new(config: SdkConfig) -> Result<Self, SdkError> {
        logging::init_logging(&config.log_level);

        let file_paths = FilePathService::new(config.file_paths.clone());
        let device = file_paths
            .storage_roots()
            .into_iter()
            .fold(LocalDeviceInfo::new(), |device, (name, root)| {
                device.with_volume(name, root)
            });
        let file_service = Arc::new(LocalFileService::new(
            config.assets_dir.clone(),
            Arc::new(device),
        ));
        let api_service = Arc::new(HttpApiService::new(config.api.clone())?);
        let store = cache::open_store(&config.cache).await?;

        info!(platform = %config.platform, "Content SDK initialized");
        Ok(Self::with_services(
            config,
            file_service,
            api_service,
            store,
            Arc::new(LoggingTelemetryService),
        ))
    }

    pub fn with_services(
        config: SdkConfig,
        file_service: Arc<dyn FileService>,
        api_service: Arc<dyn ApiService>,
        store: Arc<dyn KeyValueStore>,
        telemetry_service: Arc<dyn TelemetryService>,
    ) -> Self {
        let file_paths = Arc::new(FilePathService::new(config.file_paths.clone()));
        let cached_item_store = Arc::new(CachedItemStore::new(store, config.cache.clone()));

        let form_handler = GetFormHandler::new(
            api_service.clone(),
            config.form.clone(),
            file_service.clone(),
            cached_item_store.clone(),
            config.platform,
        );
        let faq_handler = GetFaqDetailsHandler::new(
            api_service.clone(),
            config.faq.clone(),
            file_service.clone(),
            cached_item_store.clone(),
            config.platform,
        );
        let system_settings_handler = GetSystemSettingsHandler::new(
            api_service,
            config.system_settings.clone(),
            file_service.clone(),
            cached_item_store.clone(),
            config.platform,
        );

        Self {
            config,
            file_paths,
            file_service,
            zip_service: Arc::new(ZipArchiveService::new()),
            telemetry_service,
            cached_item_store,
            form_handler,
            faq_handler,
            system_settings_handler,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn file_service(&self) -> Arc<dyn FileService> {
        self.file_service.clone()
    }

    pub fn file_paths(&self) -> Arc<FilePathService> {
        self.file_paths.clone()
    }

    pub fn cached_item_store(&self) -> Arc<CachedItemStore> {
        self.cached_item_store.clone()
    }

    pub async fn get_form(&self, request: &FormRequest) -> Result<serde_json::Value, CacheError> {
        self.form_handler.handle(request).await
    }

    pub async fn get_faq_details(&self, request: &GetFaqRequest) -> Result<Faq, CacheError> {
        self.faq_handler.handle(request).await
    }

    pub async fn get_system_settings(
        &self,
        request: &GetSystemSettingsRequest,
    ) -> Result<SystemSettings, CacheError> {
        self.system_settings_handler.handle(request).await
    }

    // ============================================================================
    // Import / export steps
    // ============================================================================

    pub async fn extract_ecar(
        &self,
        context: ImportContentContext,
    ) -> Result<ImportContentContext, ContentError> {
        ExtractEcar::new(self.file_service.clone(), self.zip_service.clone())
            .execute(context)
            .await
    }

    pub async fn ecar_cleanup(
        &self,
        context: ImportContentContext,
    ) -> Result<ImportContentContext, ContentError> {
        EcarCleanup::new(self.file_service.clone())
            .execute(context)
            .await
    }

    pub async fn create_temp_loc(
        &self,
        context: ExportContentContext,
    ) -> Result<ExportContentContext, ContentError> {
        CreateTempLoc::new(self.file_service.clone())
            .execute(context)
            .await
    }

    pub async fn copy_to_destination(
        &self,
        context: ExportContentContext,
        request: &ContentExportRequest,
    ) -> Result<ExportContentContext, ContentError> {
        CopyToDestination::new(
            self.file_service.clone(),
            self.file_paths.clone(),
            self.config.platform,
        )
        .execute(context, request)
        .await
    }

    pub async fn generate_export_share_telemetry(
        &self,
        context: &ExportContentContext,
        file_name: &str,
        request: &ContentExportRequest,
    ) -> Result<ContentExportResponse, ContentError> {
        GenerateExportShareTelemetry::new(
            self.telemetry_service.clone(),
            self.file_paths.clone(),
            self.config.platform,
        )
        .execute(context, file_name, request)
        .await
    }

    pub async fn validate_destination_folder(
        &self,
        context: TransferContentContext,
    ) -> Result<TransferContentContext, TransferError> {
        ValidateDestinationFolder::new(self.file_service.clone())
            .execute(context)
            .await
    }
}

// src/content/error.rs
//!
//! Content import/export errors
//!

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

/// Error codes reported to the host app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ContentErrorCode {
    ImportFailedExtractEcar,
    ImportFailedCleanup,
    ExportFailedCreateTempLocation,
    ExportFailedCopyToDestination,
    ExportFailedTelemetry,
}

impl ContentErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentErrorCode::ImportFailedExtractEcar => "IMPORT_FAILED_EXTRACT_ECAR",
            ContentErrorCode::ImportFailedCleanup => "IMPORT_FAILED_CLEANUP",
            ContentErrorCode::ExportFailedCreateTempLocation => {
                "EXPORT_FAILED_CREATE_TEMP_LOCATION"
            }
            ContentErrorCode::ExportFailedCopyToDestination => "EXPORT_FAILED_COPY_TO_DESTINATION",
            ContentErrorCode::ExportFailedTelemetry => "EXPORT_FAILED_TELEMETRY",
        }
    }
}

impl fmt::Display for ContentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to extract '{path}': {reason}")]
    ExtractEcar { path: String, reason: String },

    #[error("Failed to remove '{path}': {reason}")]
    Cleanup { path: String, reason: String },

    #[error("Failed to create temp location under '{path}': {reason}")]
    CreateTempLocation { path: String, reason: String },

    #[error("Failed to copy '{path}' to destination: {reason}")]
    CopyToDestination { path: String, reason: String },

    #[error("Failed to send share telemetry: {reason}")]
    Telemetry { reason: String },
}

impl ContentError {
    pub fn code(&self) -> ContentErrorCode {
        match self {
            ContentError::ExtractEcar { .. } => ContentErrorCode::ImportFailedExtractEcar,
            ContentError::Cleanup { .. } => ContentErrorCode::ImportFailedCleanup,
            ContentError::CreateTempLocation { .. } => {
                ContentErrorCode::ExportFailedCreateTempLocation
            }
            ContentError::CopyToDestination { .. } => ContentErrorCode::ExportFailedCopyToDestination,
            ContentError::Telemetry { .. } => ContentErrorCode::ExportFailedTelemetry,
        }
    }
}

impl Serialize for ContentError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ContentError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

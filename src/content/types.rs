// src/content/types.rs
//!
//! Contexts passed between the import and export steps
//!

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use ts_rs::TS;

/// Metadata key holding the ECAR size in bytes
pub const FILE_SIZE: &str = "FILE_SIZE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImportContentContext {
    #[ts(type = "string")]
    pub ecar_file_path: PathBuf,
    /// Parent of the extraction dir before `ExtractEcar`, the extraction dir after it
    #[ts(type = "string")]
    pub tmp_location: PathBuf,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub metadata: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportContentContext {
    #[ts(type = "string")]
    pub tmp_location_path: PathBuf,
    #[ts(type = "string")]
    pub ecar_file_path: PathBuf,
    /// Content maps of the exported items
    #[serde(default)]
    #[ts(type = "Array<Record<string, unknown>>")]
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContentExportRequest {
    #[ts(type = "string")]
    pub destination_folder: PathBuf,
    #[serde(default)]
    pub save_locally: bool,
    #[serde(default)]
    pub content_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContentExportResponse {
    #[ts(type = "string")]
    pub exported_file_path: PathBuf,
}

// src/system_settings/mod.rs
//!
//! System Settings Module
//!
//! Tenant level settings (`{ id, field, value }`) read from the platform with a
//! bundled fallback.

pub mod handler;

pub use handler::GetSystemSettingsHandler;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GetSystemSettingsRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SystemSettings {
    pub id: String,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettingsConfig {
    pub system_settings_api_path: String,
    pub system_settings_dir_path: String,
}

impl Default for SystemSettingsConfig {
    fn default() -> Self {
        Self {
            system_settings_api_path: "/api/data/v1".to_string(),
            system_settings_dir_path: "/data/system".to_string(),
        }
    }
}

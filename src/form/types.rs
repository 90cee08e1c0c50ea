// src/form/types.rs
//!
//! Types for form requests
//!

use crate::cache::CachedItemRequestSourceFrom;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies a form definition on the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormRequest {
    /// Not part of the server payload
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub from: CachedItemRequestSourceFrom,
    #[serde(rename = "type")]
    pub form_type: String,
    pub sub_type: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormServiceConfig {
    pub api_path: String,
    /// Bundled form definitions, relative to the asset root
    pub form_config_dir_path: String,
}

impl Default for FormServiceConfig {
    fn default() -> Self {
        Self {
            api_path: "/api/data/v1/form".to_string(),
            form_config_dir_path: "/data/form".to_string(),
        }
    }
}

// src/faq/mod.rs
//!
//! FAQ Module
//!
//! Localized FAQ documents, served from a static host with a bundled fallback.

pub mod handler;

pub use handler::GetFaqDetailsHandler;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// FAQ documents are passed through as-is
pub type Faq = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GetFaqRequest {
    pub language: String,
    /// Host serving `faq-{language}.json`
    pub faq_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqServiceConfig {
    pub faq_config_dir_path: String,
}

impl Default for FaqServiceConfig {
    fn default() -> Self {
        Self {
            faq_config_dir_path: "/data/faq".to_string(),
        }
    }
}

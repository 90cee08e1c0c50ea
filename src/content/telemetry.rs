// src/content/telemetry.rs
//!
//! Share telemetry emitted when content leaves the device
//!

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShareDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShareType {
    File,
    Link,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShareItemType {
    Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShareItem {
    #[serde(rename = "type")]
    pub item_type: ShareItemType,
    pub origin: String,
    pub identifier: String,
    pub pkg_version: f64,
    pub transfer_count: u64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TelemetryShareRequest {
    pub dir: ShareDirection,
    #[serde(rename = "type")]
    pub share_type: ShareType,
    pub items: Vec<ShareItem>,
    pub env: String,
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Telemetry event rejected: {reason}")]
    Rejected { reason: String },
}

/// Telemetry sink
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait TelemetryService: Send + Sync {
    async fn share(&self, request: &TelemetryShareRequest) -> Result<(), TelemetryError>;
}

/// Writes share events to the `telemetry` tracing target
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTelemetryService;

#[async_trait]
impl TelemetryService for LoggingTelemetryService {
    async fn share(&self, request: &TelemetryShareRequest) -> Result<(), TelemetryError> {
        let event = serde_json::to_string(request).map_err(|e| TelemetryError::Rejected {
            reason: e.to_string(),
        })?;

        info!(target: "telemetry", eid = "SHARE", event = %event, "Share event");
        Ok(())
    }
}

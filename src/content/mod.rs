// src/content/mod.rs
//!
//! Content Module
//!
//! Steps of the content import (ECAR extraction, cleanup) and export (temp
//! location, copy to destination, share telemetry) pipelines. Each step takes a
//! context and hands back the updated context or a [`ContentError`].

pub mod archive;
pub mod error;
pub mod export;
pub mod import;
pub mod telemetry;
pub mod types;
pub mod util;

pub use archive::{ZipArchiveService, ZipService};
pub use error::{ContentError, ContentErrorCode};
pub use export::{CopyToDestination, CreateTempLoc, GenerateExportShareTelemetry};
pub use import::{EcarCleanup, ExtractEcar};
pub use telemetry::{LoggingTelemetryService, TelemetryService};
pub use types::*;

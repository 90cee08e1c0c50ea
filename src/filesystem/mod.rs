// src/filesystem/mod.rs
//!
//! Filesystem Module
//!
//! Provides the file operations used throughout the SDK.
//! Content import/export and the resource handlers go through the `FileService` trait.

pub mod device;
pub mod error;
pub mod path;
pub mod service;
pub mod types;

pub use device::{DeviceInfo, LocalDeviceInfo};
pub use error::FsError;
pub use service::{FileService, LocalFileService};
pub use types::*;

// src/filesystem/service.rs
//!
//! File service
//!
//! Path-based file operations mirroring the platform filesystem plugin API.
//! Every operation logs its failure before handing the error back to the caller.

use crate::filesystem::device::DeviceInfo;
use crate::filesystem::error::FsError;
use crate::filesystem::path::{
    collapse_slashes, file_name_from_file_path, join, native_url, resolve_in_directory,
    strip_asset_prefix, trim_trailing_slash,
};
use crate::filesystem::types::{
    CreateFileResult, DirEntry, Entry, ExistsResult, Flags, Metadata, SuccessResult,
    TempLocation, WriteOptions,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

/// File service trait
///
/// Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait FileService: Send + Sync {
    /// Read `path/file_name` as UTF-8 text
    async fn read_as_text(&self, path: &str, file_name: &str) -> Result<String, FsError>;

    /// Read `path/file_name` as raw bytes
    async fn read_as_binary(&self, path: &str, file_name: &str) -> Result<Vec<u8>, FsError>;

    /// Read a file and return its contents base64 encoded
    async fn read_as_base64(&self, path: &str) -> Result<String, FsError>;

    /// Read a bundled asset as text
    async fn read_file_from_assets(&self, file_name: &str) -> Result<String, FsError>;

    async fn write_file(
        &self,
        path: &str,
        file_name: &str,
        text: &str,
        options: WriteOptions,
    ) -> Result<SuccessResult, FsError>;

    /// Create an empty file. Fails if it exists and `replace` is false.
    async fn create_file(
        &self,
        path: &str,
        file_name: &str,
        replace: bool,
    ) -> Result<CreateFileResult, FsError>;

    async fn remove_file(&self, path: &str) -> Result<SuccessResult, FsError>;

    async fn get_file(
        &self,
        directory: &Entry,
        file_name: &str,
        flags: Flags,
    ) -> Result<Entry, FsError>;

    /// Create a directory tree. With `replace`, an existing directory is wiped first.
    async fn create_dir(&self, path: &str, replace: bool) -> Result<Entry, FsError>;

    async fn list_dir(&self, directory_path: &str) -> Result<Vec<DirEntry>, FsError>;

    /// Remove a listed entry, recursively for directories
    async fn remove_entry(&self, entry: &DirEntry) -> Result<SuccessResult, FsError>;

    async fn remove_dir(&self, path: &str, dir_name: &str) -> Result<SuccessResult, FsError>;

    async fn remove_recursively(&self, path: &str) -> Result<SuccessResult, FsError>;

    /// Copy a directory tree. Fails if the destination exists.
    async fn copy_dir(
        &self,
        path: &str,
        dir_name: &str,
        new_path: &str,
        new_dir_name: &str,
    ) -> Result<Entry, FsError>;

    async fn copy_file(
        &self,
        path: &str,
        file_name: &str,
        new_path: &str,
        new_file_name: &str,
    ) -> Result<Entry, FsError>;

    async fn get_metadata(&self, path: &str) -> Result<Metadata, FsError>;

    async fn exists(&self, path: &str) -> Result<ExistsResult, FsError>;

    /// `destination_path/tmp/`, created on demand
    async fn get_temp_location(&self, destination_path: &str) -> Result<TempLocation, FsError>;

    /// Sum of the available bytes over all storage volumes
    async fn get_free_disk_space(&self) -> Result<u64, FsError>;

    /// Recursive size of a directory. Never fails, unreadable parts count as 0.
    async fn get_directory_size(&self, path: &str) -> u64;
}

/// `FileService` backed by the local filesystem
pub struct LocalFileService {
    assets_dir: PathBuf,
    device_info: Arc<dyn DeviceInfo>,
}

impl LocalFileService {
    pub fn new(assets_dir: impl Into<PathBuf>, device_info: Arc<dyn DeviceInfo>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            device_info,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

async fn path_exists(path: &str) -> bool {
    fs::metadata(path).await.is_ok()
}

async fn create_parent_dirs(path: &str) -> Result<(), FsError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && fs::metadata(parent).await.is_err() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FsError::from_io(parent.to_string_lossy(), e))?;
        }
    }
    Ok(())
}

/// True when `destination` names the file `source` already is. The destination
/// may not exist yet, so its parent is resolved instead.
async fn is_same_file(source: &str, destination: &str) -> bool {
    let destination = Path::new(destination);
    let (Some(parent), Some(name)) = (destination.parent(), destination.file_name()) else {
        return false;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    match (fs::canonicalize(source).await, fs::canonicalize(parent).await) {
        (Ok(source), Ok(parent)) => source == parent.join(name),
        _ => false,
    }
}

fn modified_millis(metadata: &std::fs::Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn file_entry(path: &str) -> Entry {
    let full_path = PathBuf::from(path);
    Entry {
        is_file: true,
        is_directory: false,
        name: file_name_from_file_path(path),
        native_url: native_url(&full_path, false),
        full_path,
    }
}

fn directory_entry(path: &str) -> Entry {
    let trimmed = trim_trailing_slash(path);
    let full_path = PathBuf::from(trimmed);
    Entry {
        is_file: false,
        is_directory: true,
        name: file_name_from_file_path(trimmed),
        native_url: native_url(&full_path, true),
        full_path,
    }
}

fn log_failure<T>(operation: &str, path: &str, result: Result<T, FsError>) -> Result<T, FsError> {
    if let Err(e) = &result {
        error!(path = %path, error = %e, "Error {operation}");
    }
    result
}

// ============================================================================
// Operations
// ============================================================================

impl LocalFileService {
    async fn write_file_inner(
        full_path: &str,
        text: &str,
        options: WriteOptions,
    ) -> Result<SuccessResult, FsError> {
        if !options.replace && path_exists(full_path).await {
            return Err(FsError::AlreadyExists {
                path: full_path.to_string(),
            });
        }

        create_parent_dirs(full_path).await?;

        let mut open_options = fs::OpenOptions::new();
        if options.append {
            open_options.append(true);
        } else {
            open_options.write(true).truncate(true);
        }
        if options.replace {
            open_options.create(true);
        } else {
            open_options.create_new(true);
        }

        let mut file = open_options
            .open(full_path)
            .await
            .map_err(|e| FsError::from_io(full_path, e))?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|e| FsError::from_io(full_path, e))?;
        file.flush().await.map_err(|e| FsError::from_io(full_path, e))?;

        Ok(SuccessResult::ok())
    }

    async fn create_dir_inner(path: &str, replace: bool) -> Result<Entry, FsError> {
        let existing = fs::metadata(path).await.ok();

        if existing.is_some() && !replace {
            return Ok(directory_entry(path));
        }

        if let Some(metadata) = existing {
            if metadata.is_dir() {
                fs::remove_dir_all(path)
                    .await
                    .map_err(|e| FsError::from_io(path, e))?;
            } else {
                fs::remove_file(path)
                    .await
                    .map_err(|e| FsError::from_io(path, e))?;
            }
        }

        fs::create_dir_all(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        Ok(directory_entry(path))
    }

    async fn list_dir_inner(directory_path: &str) -> Result<Vec<DirEntry>, FsError> {
        let mut read_dir = fs::read_dir(directory_path)
            .await
            .map_err(|e| FsError::from_io(directory_path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(directory_path, e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            let full_path = collapse_slashes(&format!("{}/{}", directory_path, name));
            let metadata = fs::metadata(&full_path)
                .await
                .map_err(|e| FsError::from_io(&full_path, e))?;
            let full_path = PathBuf::from(full_path);

            entries.push(DirEntry {
                is_file: metadata.is_file(),
                is_directory: metadata.is_dir(),
                name,
                native_url: native_url(&full_path, metadata.is_dir()),
                full_path,
                filesystem: "default".to_string(),
            });
        }

        // Sort: directories first, then files, both alphabetically
        entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        });

        Ok(entries)
    }

    async fn copy_dir_inner(source: &str, destination: &str) -> Result<Entry, FsError> {
        let metadata = fs::metadata(source)
            .await
            .map_err(|e| FsError::from_io(source, e))?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory {
                path: source.to_string(),
            });
        }

        if path_exists(destination).await {
            return Err(FsError::AlreadyExists {
                path: destination.to_string(),
            });
        }
        create_parent_dirs(destination).await?;

        let from = PathBuf::from(source);
        let to = PathBuf::from(destination);
        tokio::task::spawn_blocking(move || {
            // copy_inside with a missing destination copies the contents into it
            let mut options = fs_extra::dir::CopyOptions::new();
            options.copy_inside = true;
            fs_extra::dir::copy(&from, &to, &options)
        })
        .await
        .map_err(|e| FsError::IoError {
            reason: format!("Copy task failed: {}", e),
        })?
        .map_err(|e| FsError::IoError {
            reason: format!("Failed to copy '{}' to '{}': {}", source, destination, e),
        })?;

        Ok(directory_entry(destination))
    }

    async fn copy_file_inner(source: &str, destination: &str) -> Result<Entry, FsError> {
        let metadata = fs::metadata(source)
            .await
            .map_err(|e| FsError::from_io(source, e))?;
        if !metadata.is_file() {
            return Err(FsError::NotAFile {
                path: source.to_string(),
            });
        }

        create_parent_dirs(destination).await?;
        if is_same_file(source, destination).await {
            // fs::copy would truncate the file before reading it
            debug!(path = %source, "Copy source and destination are the same file");
            return Ok(file_entry(destination));
        }

        fs::copy(source, destination)
            .await
            .map_err(|e| FsError::IoError {
                reason: format!("Failed to copy '{}' to '{}': {}", source, destination, e),
            })?;

        Ok(file_entry(destination))
    }

    /// Walks the tree without following symlinks. Unreadable directories add nothing.
    async fn tree_size(root: &Path) -> u64 {
        let mut total = 0u64;
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut read_dir = match fs::read_dir(&dir).await {
                Ok(read_dir) => read_dir,
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "Error reading directory");
                    continue;
                }
            };

            loop {
                let entry = match read_dir.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(path = %dir.display(), error = %e, "Error reading directory entry");
                        break;
                    }
                };

                let file_type = match entry.file_type().await {
                    Ok(file_type) => file_type,
                    Err(_) => continue,
                };

                if file_type.is_dir() {
                    pending.push(entry.path());
                } else if file_type.is_file() {
                    if let Ok(metadata) = entry.metadata().await {
                        total += metadata.len();
                    }
                }
            }
        }

        total
    }
}

#[async_trait]
impl FileService for LocalFileService {
    async fn read_as_text(&self, path: &str, file_name: &str) -> Result<String, FsError> {
        let full_path = join(path, file_name);
        let result: Result<String, FsError> = async {
            let bytes = fs::read(&full_path)
                .await
                .map_err(|e| FsError::from_io(&full_path, e))?;
            String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
                path: full_path.clone(),
                reason: e.to_string(),
            })
        }
        .await;
        log_failure("reading file as text", &full_path, result)
    }

    async fn read_as_binary(&self, path: &str, file_name: &str) -> Result<Vec<u8>, FsError> {
        let full_path = join(path, file_name);
        let result = fs::read(&full_path)
            .await
            .map_err(|e| FsError::from_io(&full_path, e));
        log_failure("reading file as binary", &full_path, result)
    }

    async fn read_as_base64(&self, path: &str) -> Result<String, FsError> {
        use base64::{engine::general_purpose::STANDARD, Engine};

        let result = fs::read(path).await.map_err(|e| FsError::from_io(path, e));
        log_failure("reading file as base64", path, result).map(|data| STANDARD.encode(data))
    }

    async fn read_file_from_assets(&self, file_name: &str) -> Result<String, FsError> {
        let result: Result<String, FsError> = async {
            let asset = resolve_in_directory(&self.assets_dir, strip_asset_prefix(file_name))?;
            fs::read_to_string(&asset)
                .await
                .map_err(|e| FsError::from_io(asset.to_string_lossy(), e))
        }
        .await;
        log_failure("reading asset", file_name, result)
    }

    async fn write_file(
        &self,
        path: &str,
        file_name: &str,
        text: &str,
        options: WriteOptions,
    ) -> Result<SuccessResult, FsError> {
        let full_path = join(path, file_name);
        let result = Self::write_file_inner(&full_path, text, options).await;
        log_failure("writing file", &full_path, result)
    }

    async fn create_file(
        &self,
        path: &str,
        file_name: &str,
        replace: bool,
    ) -> Result<CreateFileResult, FsError> {
        let full_path = join(path, file_name);
        let result: Result<CreateFileResult, FsError> = async {
            if path_exists(&full_path).await && !replace {
                return Err(FsError::AlreadyExists {
                    path: full_path.clone(),
                });
            }

            fs::write(&full_path, b"")
                .await
                .map_err(|e| FsError::from_io(&full_path, e))?;

            let entry = file_entry(&full_path);
            Ok(CreateFileResult {
                success: true,
                path: entry.full_path,
                native_url: entry.native_url,
            })
        }
        .await;
        log_failure("creating file", &full_path, result)
    }

    async fn remove_file(&self, path: &str) -> Result<SuccessResult, FsError> {
        let result = fs::remove_file(path)
            .await
            .map(|_| SuccessResult::ok())
            .map_err(|e| FsError::from_io(path, e));
        log_failure("removing file", path, result)
    }

    async fn get_file(
        &self,
        directory: &Entry,
        file_name: &str,
        flags: Flags,
    ) -> Result<Entry, FsError> {
        let full_path = join(&directory.full_path.to_string_lossy(), file_name);
        let result: Result<Entry, FsError> = async {
            match fs::metadata(&full_path).await {
                Ok(metadata) => {
                    if flags.create && flags.exclusive {
                        return Err(FsError::AlreadyExists {
                            path: full_path.clone(),
                        });
                    }
                    if !metadata.is_file() {
                        return Err(FsError::NotAFile {
                            path: full_path.clone(),
                        });
                    }
                    Ok(file_entry(&full_path))
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound && flags.create => {
                    fs::write(&full_path, b"")
                        .await
                        .map_err(|e| FsError::from_io(&full_path, e))?;
                    Ok(file_entry(&full_path))
                }
                Err(e) => Err(FsError::from_io(&full_path, e)),
            }
        }
        .await;
        log_failure("getting file", &full_path, result)
    }

    async fn create_dir(&self, path: &str, replace: bool) -> Result<Entry, FsError> {
        let result = Self::create_dir_inner(path, replace).await;
        log_failure("creating directory", path, result)
    }

    async fn list_dir(&self, directory_path: &str) -> Result<Vec<DirEntry>, FsError> {
        let result = Self::list_dir_inner(directory_path).await;
        log_failure("listing directory", directory_path, result)
    }

    async fn remove_entry(&self, entry: &DirEntry) -> Result<SuccessResult, FsError> {
        let path = entry.full_path.to_string_lossy().to_string();
        let result = if entry.is_file {
            fs::remove_file(&entry.full_path).await
        } else {
            fs::remove_dir_all(&entry.full_path).await
        }
        .map(|_| SuccessResult::ok())
        .map_err(|e| FsError::from_io(&path, e));
        log_failure("removing entry", &path, result)
    }

    async fn remove_dir(&self, path: &str, dir_name: &str) -> Result<SuccessResult, FsError> {
        let full_path = join(path, dir_name);
        let result = fs::remove_dir_all(&full_path)
            .await
            .map(|_| SuccessResult::ok())
            .map_err(|e| FsError::from_io(&full_path, e));
        log_failure("removing directory", &full_path, result)
    }

    async fn remove_recursively(&self, path: &str) -> Result<SuccessResult, FsError> {
        let result = fs::remove_dir_all(path)
            .await
            .map(|_| SuccessResult::ok())
            .map_err(|e| FsError::from_io(path, e));
        log_failure("removing directory recursively", path, result)
    }

    async fn copy_dir(
        &self,
        path: &str,
        dir_name: &str,
        new_path: &str,
        new_dir_name: &str,
    ) -> Result<Entry, FsError> {
        let source = join(path, dir_name);
        let destination = join(new_path, new_dir_name);
        let result = Self::copy_dir_inner(&source, &destination).await;
        log_failure("copying directory", &source, result)
    }

    async fn copy_file(
        &self,
        path: &str,
        file_name: &str,
        new_path: &str,
        new_file_name: &str,
    ) -> Result<Entry, FsError> {
        let source = join(path, file_name);
        let destination = join(new_path, new_file_name);
        let result = Self::copy_file_inner(&source, &destination).await;
        log_failure("copying file", &source, result)
    }

    async fn get_metadata(&self, path: &str) -> Result<Metadata, FsError> {
        let result = fs::metadata(path)
            .await
            .map(|metadata| Metadata {
                modification_time: modified_millis(&metadata),
                size: metadata.len(),
            })
            .map_err(|e| FsError::from_io(path, e));
        log_failure("retrieving metadata", path, result)
    }

    async fn exists(&self, path: &str) -> Result<ExistsResult, FsError> {
        match fs::metadata(path).await {
            Ok(metadata) => Ok(ExistsResult {
                exists: true,
                native_url: Some(native_url(Path::new(path), metadata.is_dir())),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ExistsResult {
                exists: false,
                native_url: None,
            }),
            Err(e) => log_failure("checking existence", path, Err(FsError::from_io(path, e))),
        }
    }

    async fn get_temp_location(&self, destination_path: &str) -> Result<TempLocation, FsError> {
        let temp_path = if destination_path.ends_with('/') {
            format!("{}tmp/", destination_path)
        } else {
            format!("{}/tmp/", destination_path)
        };

        let result: Result<TempLocation, FsError> = async {
            if let Err(e) = fs::metadata(&temp_path).await {
                info!(path = %temp_path, error = %e, "Temp location missing, creating it");
                fs::create_dir_all(&temp_path)
                    .await
                    .map_err(|e| FsError::from_io(&temp_path, e))?;
            }

            let path = PathBuf::from(&temp_path);
            Ok(TempLocation {
                native_url: native_url(&path, true),
                path,
            })
        }
        .await;
        log_failure("creating temp location", destination_path, result)
    }

    async fn get_free_disk_space(&self) -> Result<u64, FsError> {
        let volumes = self.device_info.storage_volumes().await.map_err(|e| {
            error!(error = %e, "Error getting free disk space");
            e
        })?;

        for volume in &volumes {
            info!(
                volume = %volume.storage_destination,
                available = volume.info.available_size,
                "Storage volume"
            );
        }

        Ok(volumes.iter().map(|v| v.info.available_size).sum())
    }

    async fn get_directory_size(&self, path: &str) -> u64 {
        if path.is_empty() {
            return 0;
        }

        if let Err(e) = fs::metadata(path).await {
            error!(path = %path, error = %e, "Error getting directory size");
            return 0;
        }

        let size = Self::tree_size(Path::new(path)).await;
        debug!(path = %path, size, "Directory size");
        size
    }
}

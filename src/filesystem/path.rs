// src/filesystem/path.rs
//!
//! Path string helpers shared by the file service and the request handlers.
//!
//! Paths coming from the platform layer are plain strings that may carry a
//! trailing slash. These helpers keep the joining rules in one place.

use crate::config::Platform;
use crate::filesystem::error::FsError;
use std::path::{Path, PathBuf};

/// Bundled asset root as seen by the Android web layer
pub const ANDROID_ASSETS_PATH: &str = "file:///android_asset/www/assets";

/// Bundled asset root as seen by the iOS web layer
pub const IOS_ASSETS_PATH: &str = "www/assets";

/// Returns everything before the last `/` (empty when there is none)
pub fn dir_path_from_file_path(file_path: &str) -> String {
    match file_path.rfind('/') {
        Some(idx) => file_path[..idx].to_string(),
        None => String::new(),
    }
}

/// Returns everything after the last `/`
pub fn file_name_from_file_path(file_path: &str) -> String {
    match file_path.rfind('/') {
        Some(idx) => file_path[idx + 1..].to_string(),
        None => file_path.to_string(),
    }
}

/// Drops one trailing `/`, leaving a lone `/` untouched
pub fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

/// Joins a base path and a name with exactly one `/`
pub fn join(base: &str, name: &str) -> String {
    let base = trim_trailing_slash(base);
    if base.is_empty() {
        return name.to_string();
    }
    if base == "/" {
        return format!("/{}", name.trim_start_matches('/'));
    }
    format!("{}/{}", base, name.trim_start_matches('/'))
}

/// Collapses every `//` into `/`
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}

/// Asset root prefix used when composing bundled resource paths
pub fn asset_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Ios => IOS_ASSETS_PATH,
        Platform::Android => ANDROID_ASSETS_PATH,
    }
}

/// Strips either platform asset prefix so the remainder is relative to the assets dir
pub fn strip_asset_prefix(file_name: &str) -> &str {
    let stripped = file_name
        .strip_prefix(ANDROID_ASSETS_PATH)
        .or_else(|| file_name.strip_prefix(IOS_ASSETS_PATH))
        .unwrap_or(file_name);
    stripped.trim_start_matches('/')
}

/// `file://` URL for a path. Directories end with a slash.
pub fn native_url(path: &Path, is_dir: bool) -> String {
    let parsed = if is_dir {
        url::Url::from_directory_path(path)
    } else {
        url::Url::from_file_path(path)
    };

    match parsed {
        Ok(url) => url.to_string(),
        // Relative paths cannot become URLs, keep the platform's plain form
        Err(()) => {
            let display = path.to_string_lossy();
            if is_dir && !display.ends_with('/') {
                format!("file://{}/", display)
            } else {
                format!("file://{}", display)
            }
        }
    }
}

/// Resolves a relative path inside `base_dir`, rejecting traversal.
pub fn resolve_in_directory(base_dir: &Path, relative_path: &str) -> Result<PathBuf, FsError> {
    if relative_path.split(['/', '\\']).any(|part| part == "..") {
        return Err(FsError::InvalidPath {
            reason: format!("Path traversal attempt: {relative_path}"),
        });
    }

    let clean_path = relative_path
        .replace('\\', "/")
        .trim_start_matches('/')
        .split('/')
        .filter(|&part| !part.is_empty() && part != ".")
        .collect::<PathBuf>();

    Ok(base_dir.join(clean_path))
}

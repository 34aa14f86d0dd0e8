// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Disk-backed upload handling
//!
//! Uploads are written under a single directory with sanitized filenames and
//! removed again once the request finishes. [`UploadGuard`] ties removal to
//! `Drop`, so the file is gone on every exit path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Allowed upload extensions (lowercase)
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Custom error types for upload handling
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("File type not allowed. Supported: png, jpg, jpeg, gif")]
    DisallowedExtension,

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("Failed to write upload: {0}")]
    Io(#[from] io::Error),
}

/// Check whether a client filename carries an allowed extension
pub fn allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Sanitize a client-supplied filename for use on disk
///
/// Strips path components, maps whitespace to `_`, keeps only ASCII
/// alphanumerics and `.`/`-`/`_`, and trims leading dots. Returns `None`
/// when nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = basename
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Upload directory manager
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create the store, ensuring the directory exists
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The upload directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an upload, returning a guard that removes the
    /// file on drop
    pub fn save(&self, client_filename: &str, bytes: &[u8]) -> Result<UploadGuard, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::MissingFile);
        }
        if !allowed_extension(client_filename) {
            return Err(UploadError::DisallowedExtension);
        }
        let filename = sanitize_filename(client_filename).ok_or(UploadError::InvalidFilename)?;

        let path = self.dir.join(filename);
        fs::write(&path, bytes)?;
        debug!("Saved upload to {} ({} bytes)", path.display(), bytes.len());

        Ok(UploadGuard { path })
    }
}

/// RAII guard for an on-disk upload; removes the file when dropped
#[derive(Debug)]
pub struct UploadGuard {
    path: PathBuf,
}

impl UploadGuard {
    /// Path of the persisted upload
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to remove upload {}: {}", self.path.display(), e);
            }
        }
    }
}

//! S3 bucket operations for the drop zone

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod client;
mod error;
mod naming;
mod provision;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
pub use client::BucketClient;
pub use error::{BucketError, BucketResult};
pub use naming::validate_drop_zone_name;
pub use provision::{normalize_location, DropZoneCreation, DEFAULT_REGION};

/// Presigned download link with expiration information
#[derive(Debug, Clone)]
pub struct ShareLink {
    /// Object key the link points at
    pub key: String,
    /// The presigned URL for GET operations
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// An object stored in the drop zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, when reported
    pub last_modified: Option<DateTime<Utc>>,
}

/// A local file validated for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Local path of the file
    pub path: PathBuf,
    /// Destination object key
    pub key: String,
    /// File size in bytes
    pub size: u64,
}

impl UploadRequest {
    /// Validates `path` and picks the object key
    ///
    /// The key defaults to the file name when `key` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::FileNotFound` if `path` is not an existing regular file
    pub fn from_path(path: &Path, key: Option<&str>) -> BucketResult<Self> {
        let metadata = std::fs::metadata(path)
            .map_err(|_| BucketError::FileNotFound(path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(BucketError::FileNotFound(path.to_path_buf()));
        }

        let key = match key {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| BucketError::FileNotFound(path.to_path_buf()))?,
        };

        Ok(Self {
            path: path.to_path_buf(),
            key,
            size: metadata.len(),
        })
    }
}

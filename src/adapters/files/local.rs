//! Local Filesystem Storage Adapter - Implementation of FileStorage.
//!
//! Files are content-addressed: the stored name is the SHA-256 digest of the
//! bytes followed by the sanitized original name, so re-uploading the same
//! file yields the same URL.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{FileStorage, FileUpload, StorageError, StoredFile};

/// Default upload limit (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Stores uploads in one flat directory served under `public_base_url`.
///
/// # Atomic Writes
///
/// Content goes to `<name>.tmp`, is synced, then renamed into place.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
    max_bytes: u64,
}

impl LocalFileStorage {
    /// # Example
    ///
    /// ```rust,ignore
    /// let storage = LocalFileStorage::new("./uploads", "http://localhost:8080/uploads");
    /// ```
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn url_for(&self, stored_name: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), stored_name)
    }
}

/// Rejects empty and oversized uploads before any IO happens.
pub(super) fn check_size(file: &FileUpload, max_bytes: u64) -> Result<(), StorageError> {
    if file.bytes.is_empty() {
        return Err(StorageError::empty_file(&file.file_name));
    }
    if file.size_bytes() > max_bytes {
        return Err(StorageError::file_too_large(file.size_bytes(), max_bytes));
    }
    Ok(())
}

/// Keeps `[A-Za-z0-9._-]` and replaces everything else with `_`.
pub(super) fn sanitize_file_name(file_name: &str) -> Result<String, StorageError> {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(|c| c == '.' || c == '_').is_empty() {
        return Err(StorageError::invalid_file_name(file_name));
    }
    Ok(cleaned)
}

pub(super) fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, StorageError> {
        check_size(&file, self.max_bytes)?;
        let name = sanitize_file_name(&file.file_name)?;
        let digest = checksum(&file.bytes);
        let stored_name = format!("{}-{}", digest, name);
        let target = self.root.join(&stored_name);

        fs::create_dir_all(&self.root).await?;

        if fs::try_exists(&target).await? {
            tracing::debug!(file = %stored_name, "Upload already stored");
        } else {
            let temp = self.root.join(format!("{}.tmp", stored_name));
            let mut out = fs::File::create(&temp).await?;
            if let Err(e) = write_and_sync(&mut out, &file.bytes).await {
                let _ = fs::remove_file(&temp).await;
                return Err(e);
            }
            fs::rename(&temp, &target).await?;
            tracing::info!(file = %stored_name, size_bytes = file.size_bytes(), "Stored upload");
        }

        Ok(StoredFile {
            url: self.url_for(&stored_name),
            checksum: digest,
            size_bytes: file.size_bytes(),
        })
    }
}

async fn write_and_sync(out: &mut fs::File, bytes: &[u8]) -> Result<(), StorageError> {
    out.write_all(bytes).await?;
    out.sync_all().await?;
    Ok(())
}

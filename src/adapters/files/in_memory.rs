//! In-memory file storage for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::local::{check_size, checksum, sanitize_file_name, DEFAULT_MAX_UPLOAD_BYTES};
use crate::ports::{FileStorage, FileUpload, StorageError, StoredFile};

const BASE_URL: &str = "memory://uploads";

/// Keeps uploaded bytes in a map keyed by URL.
///
/// `fail_uploads(true)` makes every later upload fail with an IO error,
/// which lets handler tests exercise the storage-failure path.
#[derive(Debug, Clone)]
pub struct InMemoryFileStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    max_bytes: u64,
    failing: Arc<AtomicBool>,
}

impl Default for InMemoryFileStorage {
    fn default() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            failing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn fail_uploads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn contents(&self, url: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(url).cloned()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::io("simulated storage outage"));
        }
        check_size(&file, self.max_bytes)?;
        let name = sanitize_file_name(&file.file_name)?;
        let digest = checksum(&file.bytes);
        let url = format!("{}/{}-{}", BASE_URL, digest, name);
        let size_bytes = file.size_bytes();

        self.files.write().await.insert(url.clone(), file.bytes);
        Ok(StoredFile {
            url,
            checksum: digest,
            size_bytes,
        })
    }
}

//! Storage configuration: record file and upload directory

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::files::DEFAULT_MAX_UPLOAD_BYTES;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every freight record
    #[serde(default = "default_records_path")]
    pub records_path: PathBuf,

    /// Directory receiving map images and invoices
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// URL prefix under which `uploads_dir` is served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.records_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.records_path"));
        }
        if self.uploads_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.uploads_dir"));
        }
        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidPublicBaseUrl);
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
            uploads_dir: default_uploads_dir(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_records_path() -> PathBuf {
    PathBuf::from("./data/freights.json")
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./data/uploads")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/uploads".to_string()
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

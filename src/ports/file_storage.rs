//! File Storage Port - Upload interface for map images and invoices.
//!
//! The store accepts a file and hands back a public URL. Nothing else about
//! the stored bytes is exposed to the application.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::freight::FreightError;

/// Port for uploading files.
///
/// # Contract
///
/// Implementations must:
/// - Reject empty files and files above their size limit
/// - Return a URL that stays valid for the lifetime of the record
/// - Leave no partially written file behind on failure
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the file and returns where it can be fetched.
    async fn upload(&self, file: FileUpload) -> Result<StoredFile, StorageError>;
}

/// A file submitted by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    /// MIME type reported by the client, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
    pub size_bytes: u64,
}

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Nothing to store.
    #[error("File is empty: {file_name}")]
    EmptyFile { file_name: String },

    /// File name has no usable characters.
    #[error("Invalid file name: {file_name}")]
    InvalidFileName { file_name: String },

    /// Content type not accepted for this upload.
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// Permission denied accessing the storage directory.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    pub fn empty_file(file_name: impl Into<String>) -> Self {
        Self::EmptyFile {
            file_name: file_name.into(),
        }
    }

    pub fn invalid_file_name(file_name: impl Into<String>) -> Self {
        Self::InvalidFileName {
            file_name: file_name.into(),
        }
    }

    pub fn unsupported_content_type(content_type: impl Into<String>) -> Self {
        Self::UnsupportedContentType {
            content_type: content_type.into(),
        }
    }

    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// True when the operator can fix the problem by choosing another file.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::PermissionDenied { .. } | Self::Io { .. })
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: err.to_string(),
            },
            _ => StorageError::io(err.to_string()),
        }
    }
}

impl From<StorageError> for FreightError {
    fn from(err: StorageError) -> Self {
        if err.is_rejection() {
            FreightError::validation("file", err.to_string())
        } else {
            FreightError::infrastructure(err.to_string())
        }
    }
}

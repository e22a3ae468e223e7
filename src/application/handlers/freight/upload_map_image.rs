//! UploadMapImageHandler - Stores the map picture attached on the quotation form.

use std::sync::Arc;

use crate::domain::freight::FreightError;
use crate::ports::{FileStorage, FileUpload, StorageError};

#[derive(Debug, Clone)]
pub struct UploadMapImageCommand {
    pub file: FileUpload,
}

/// Where the image was stored; `url` goes into `QuotationRequest::map_image_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMapImageResult {
    pub url: String,
    pub checksum: String,
}

pub struct UploadMapImageHandler {
    file_storage: Arc<dyn FileStorage>,
}

impl UploadMapImageHandler {
    pub fn new(file_storage: Arc<dyn FileStorage>) -> Self {
        Self { file_storage }
    }

    pub async fn handle(&self, cmd: UploadMapImageCommand) -> Result<UploadMapImageResult, FreightError> {
        if !cmd.file.is_image() {
            tracing::warn!(
                file_name = %cmd.file.file_name,
                content_type = %cmd.file.content_type,
                "Rejected non-image map upload"
            );
            return Err(StorageError::unsupported_content_type(cmd.file.content_type).into());
        }

        let file_name = cmd.file.file_name.clone();
        let stored = self.file_storage.upload(cmd.file).await.map_err(|e| {
            tracing::error!(file_name = %file_name, error = %e, "Map image upload failed");
            FreightError::from(e)
        })?;

        tracing::info!(url = %stored.url, size_bytes = stored.size_bytes, "Map image stored");
        Ok(UploadMapImageResult {
            url: stored.url,
            checksum: stored.checksum,
        })
    }
}

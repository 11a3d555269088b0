use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(
        &self,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, MediaStoreError>;

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, MediaStoreError>;

    async fn delete(&self, filename: &str) -> Result<(), MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("video not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

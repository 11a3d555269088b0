use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError};

/// Uploaded videos staged on the local filesystem under a base directory.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalMediaStore {
    pub fn new(base_path: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&base_path).map_err(MediaStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        filename: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, MediaStoreError> {
        let store_path = StorePath::from(filename);
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(MediaStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(MediaStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, MediaStoreError> {
        let store_path = StorePath::from(filename);
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| MediaStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| MediaStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, filename: &str) -> Result<(), MediaStoreError> {
        let store_path = StorePath::from(filename);
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))
    }
}

use async_trait::async_trait;

use crate::domain::{AudioFeature, VideoFeature, VideoId};

/// Persistence for extracted feature arrays, keyed by video id.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    async fn save_video(&self, id: &VideoId, feature: &VideoFeature)
        -> Result<(), FeatureStoreError>;

    async fn save_audio(&self, id: &VideoId, feature: &AudioFeature)
        -> Result<(), FeatureStoreError>;

    async fn load_video(&self, id: &VideoId) -> Result<VideoFeature, FeatureStoreError>;

    async fn load_audio(&self, id: &VideoId) -> Result<AudioFeature, FeatureStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeatureStoreError {
    #[error("feature file not found: {0}")]
    NotFound(String),
    #[error("invalid feature shape: {0}")]
    InvalidShape(String),
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeatureStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

use async_trait::async_trait;

use crate::domain::AudioFeature;

#[async_trait]
pub trait AudioEncoder: Send + Sync {
    /// Encodes compressed audio bytes into a pooled `[1, 1024]` embedding.
    async fn encode(&self, audio: &[u8]) -> Result<AudioFeature, AudioEncoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioEncoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

use async_trait::async_trait;

use crate::domain::VideoFeature;

#[async_trait]
pub trait VisualEncoder: Send + Sync {
    /// Encodes JPEG frames into per-frame CLS embeddings, `[T_v, 1408]`.
    async fn encode_frames(&self, frames: &[Vec<u8>]) -> Result<VideoFeature, VisualEncoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VisualEncoderError {
    #[error("no frames to encode")]
    NoFrames,
    #[error("frame decoding failed: {0}")]
    FrameDecodingFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

use async_trait::async_trait;

use crate::domain::{AudioFeature, Caption, TokenSequence, VideoFeature};

/// Output of one greedy decode: the raw token trace and the final text.
#[derive(Debug, Clone)]
pub struct GeneratedCaption {
    pub tokens: TokenSequence,
    pub caption: Caption,
}

/// Single inference entry point over the fusion encoder and caption decoder.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn generate(
        &self,
        video: &VideoFeature,
        audio: &AudioFeature,
    ) -> Result<GeneratedCaption, CaptionerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptionerError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("detokenization failed: {0}")]
    DetokenizationFailed(String),
}

use async_trait::async_trait;

use crate::domain::CaptionRecord;

/// Append-only log of accepted captions.
#[async_trait]
pub trait CaptionLog: Send + Sync {
    async fn append(&self, record: &CaptionRecord) -> Result<(), CaptionLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptionLogError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

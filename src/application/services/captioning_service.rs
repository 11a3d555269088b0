use std::sync::Arc;

use crate::application::ports::{
    CaptionLog, CaptionLogError, Captioner, CaptionerError, FeatureStore, FeatureStoreError,
    GeneratedCaption,
};
use crate::domain::{CaptionRecord, VideoId};

/// Loads persisted features and drives the fusion model to a caption.
///
/// Both feature files are loaded before inference, so a missing file
/// surfaces as `FeatureStoreError::NotFound` without touching the model.
pub struct CaptioningService<M>
where
    M: Captioner,
{
    feature_store: Arc<dyn FeatureStore>,
    model: Arc<M>,
    caption_log: Arc<dyn CaptionLog>,
}

impl<M> CaptioningService<M>
where
    M: Captioner,
{
    pub fn new(
        feature_store: Arc<dyn FeatureStore>,
        model: Arc<M>,
        caption_log: Arc<dyn CaptionLog>,
    ) -> Self {
        Self {
            feature_store,
            model,
            caption_log,
        }
    }

    pub async fn caption(&self, filename: &str) -> Result<GeneratedCaption, CaptioningError> {
        let id = VideoId::from_filename(filename);
        if id.is_empty() {
            return Err(CaptioningError::InvalidFilename(filename.to_string()));
        }

        let video = self.feature_store.load_video(&id).await?;
        let audio = self.feature_store.load_audio(&id).await?;

        let generated = self.model.generate(&video, &audio).await?;

        tracing::info!(
            video_id = %id,
            tokens = generated.tokens.len(),
            "Caption generated"
        );

        Ok(generated)
    }

    pub async fn save(&self, record: &CaptionRecord) -> Result<(), CaptioningError> {
        self.caption_log.append(record).await?;
        tracing::info!(filename = %record.filename, "Caption saved");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptioningError {
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("features: {0}")]
    Features(#[from] FeatureStoreError),
    #[error("inference: {0}")]
    Inference(#[from] CaptionerError),
    #[error("caption log: {0}")]
    Log(#[from] CaptionLogError),
}

impl CaptioningError {
    /// True when the failure is a missing feature file, reported before
    /// decoding ever starts.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Features(e) if e.is_not_found())
    }
}

use std::sync::Arc;

use crate::application::ports::{
    AudioEncoder, AudioEncoderError, DemuxError, FeatureStore, FeatureStoreError, MediaDemuxer,
    MediaStore, MediaStoreError, VisualEncoder, VisualEncoderError,
};
use crate::domain::{AudioFeature, VideoId};

/// Turns an uploaded video into persisted feature arrays:
/// demux frames + audio, run both pretrained towers, save as `.npy`.
pub struct ExtractionService<D, V, A>
where
    D: MediaDemuxer,
    V: VisualEncoder,
    A: AudioEncoder,
{
    media_store: Arc<dyn MediaStore>,
    demuxer: Arc<D>,
    visual_encoder: Arc<V>,
    audio_encoder: Arc<A>,
    feature_store: Arc<dyn FeatureStore>,
}

impl<D, V, A> ExtractionService<D, V, A>
where
    D: MediaDemuxer,
    V: VisualEncoder,
    A: AudioEncoder,
{
    pub fn new(
        media_store: Arc<dyn MediaStore>,
        demuxer: Arc<D>,
        visual_encoder: Arc<V>,
        audio_encoder: Arc<A>,
        feature_store: Arc<dyn FeatureStore>,
    ) -> Self {
        Self {
            media_store,
            demuxer,
            visual_encoder,
            audio_encoder,
            feature_store,
        }
    }

    pub async fn extract(&self, filename: &str) -> Result<VideoId, ExtractionError> {
        let id = VideoId::from_filename(filename);
        if id.is_empty() {
            return Err(ExtractionError::InvalidFilename(filename.to_string()));
        }

        let video_bytes = self.media_store.fetch(filename).await?;

        tracing::debug!(video_id = %id, bytes = video_bytes.len(), "Demuxing uploaded video");
        let demuxed = self.demuxer.demux(&video_bytes, &id).await?;

        let video_feature = self.visual_encoder.encode_frames(&demuxed.frames).await?;

        let audio_feature = match demuxed.audio_wav {
            Some(wav) => self.audio_encoder.encode(&wav).await?,
            None => {
                tracing::warn!(video_id = %id, "No audio track found, using zero-vector fallback");
                AudioFeature::zero_fallback()
            }
        };

        self.feature_store.save_video(&id, &video_feature).await?;
        self.feature_store.save_audio(&id, &audio_feature).await?;

        tracing::info!(
            video_id = %id,
            frames = video_feature.num_frames(),
            audio_segments = audio_feature.num_segments(),
            silent = audio_feature.is_zero(),
            "Feature extraction complete"
        );

        Ok(id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("media store: {0}")]
    MediaStore(#[from] MediaStoreError),
    #[error("demuxing: {0}")]
    Demuxing(#[from] DemuxError),
    #[error("visual encoding: {0}")]
    VisualEncoding(#[from] VisualEncoderError),
    #[error("audio encoding: {0}")]
    AudioEncoding(#[from] AudioEncoderError),
    #[error("feature storage: {0}")]
    Storage(#[from] FeatureStoreError),
}

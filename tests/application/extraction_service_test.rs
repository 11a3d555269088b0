use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use ndarray::Array2;
use tokio::sync::Mutex;

use vidscribe::application::ports::{
    AudioEncoder, AudioEncoderError, DemuxError, DemuxedMedia, FeatureStore, FeatureStoreError,
    MediaDemuxer, MediaStore, MediaStoreError, VisualEncoder, VisualEncoderError,
};
use vidscribe::application::services::{ExtractionError, ExtractionService};
use vidscribe::domain::{AudioFeature, VideoFeature, VideoId, AUDIO_FEATURE_DIM, VIDEO_FEATURE_DIM};

struct StubMediaStore;

#[async_trait]
impl MediaStore for StubMediaStore {
    async fn store(
        &self,
        _filename: &str,
        _stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, MediaStoreError> {
        Ok(0)
    }

    async fn fetch(&self, _filename: &str) -> Result<Vec<u8>, MediaStoreError> {
        Ok(vec![1u8; 8])
    }

    async fn delete(&self, _filename: &str) -> Result<(), MediaStoreError> {
        Ok(())
    }
}

struct StubDemuxer {
    audio_wav: Option<Vec<u8>>,
}

#[async_trait]
impl MediaDemuxer for StubDemuxer {
    async fn demux(&self, _video: &[u8], _id: &VideoId) -> Result<DemuxedMedia, DemuxError> {
        Ok(DemuxedMedia {
            frames: vec![vec![0u8; 4]; 3],
            audio_wav: self.audio_wav.clone(),
        })
    }
}

struct FailingDemuxer;

#[async_trait]
impl MediaDemuxer for FailingDemuxer {
    async fn demux(&self, _video: &[u8], _id: &VideoId) -> Result<DemuxedMedia, DemuxError> {
        Err(DemuxError::NoFrames("broken".to_string()))
    }
}

struct StubVisualEncoder;

#[async_trait]
impl VisualEncoder for StubVisualEncoder {
    async fn encode_frames(&self, frames: &[Vec<u8>]) -> Result<VideoFeature, VisualEncoderError> {
        let array = Array2::from_elem((frames.len(), VIDEO_FEATURE_DIM), 1.0);
        VideoFeature::new(array).map_err(|e| VisualEncoderError::InferenceFailed(e.to_string()))
    }
}

struct StubAudioEncoder;

#[async_trait]
impl AudioEncoder for StubAudioEncoder {
    async fn encode(&self, _audio: &[u8]) -> Result<AudioFeature, AudioEncoderError> {
        AudioFeature::from_vector(vec![0.25; AUDIO_FEATURE_DIM])
            .map_err(|e| AudioEncoderError::InferenceFailed(e.to_string()))
    }
}

#[derive(Default)]
struct RecordingFeatureStore {
    saved_video: Mutex<Option<(VideoId, VideoFeature)>>,
    saved_audio: Mutex<Option<(VideoId, AudioFeature)>>,
}

#[async_trait]
impl FeatureStore for RecordingFeatureStore {
    async fn save_video(
        &self,
        id: &VideoId,
        feature: &VideoFeature,
    ) -> Result<(), FeatureStoreError> {
        *self.saved_video.lock().await = Some((id.clone(), feature.clone()));
        Ok(())
    }

    async fn save_audio(
        &self,
        id: &VideoId,
        feature: &AudioFeature,
    ) -> Result<(), FeatureStoreError> {
        *self.saved_audio.lock().await = Some((id.clone(), feature.clone()));
        Ok(())
    }

    async fn load_video(&self, id: &VideoId) -> Result<VideoFeature, FeatureStoreError> {
        Err(FeatureStoreError::NotFound(id.to_string()))
    }

    async fn load_audio(&self, id: &VideoId) -> Result<AudioFeature, FeatureStoreError> {
        Err(FeatureStoreError::NotFound(id.to_string()))
    }
}

fn service_with_demuxer<D: MediaDemuxer>(
    demuxer: D,
    feature_store: Arc<RecordingFeatureStore>,
) -> ExtractionService<D, StubVisualEncoder, StubAudioEncoder> {
    ExtractionService::new(
        Arc::new(StubMediaStore),
        Arc::new(demuxer),
        Arc::new(StubVisualEncoder),
        Arc::new(StubAudioEncoder),
        feature_store,
    )
}

#[tokio::test]
async fn given_video_with_audio_when_extracting_then_both_features_are_saved() {
    let store = Arc::new(RecordingFeatureStore::default());
    let service = service_with_demuxer(
        StubDemuxer {
            audio_wav: Some(vec![0u8; 64]),
        },
        Arc::clone(&store),
    );

    let id = service.extract("beach trip.mp4").await.unwrap();
    assert_eq!(id.as_str(), "beach_trip");

    let video = store.saved_video.lock().await;
    let (saved_id, feature) = video.as_ref().unwrap();
    assert_eq!(saved_id, &id);
    assert_eq!(feature.num_frames(), 3);

    let audio = store.saved_audio.lock().await;
    let (_, feature) = audio.as_ref().unwrap();
    assert!(!feature.is_zero());
}

#[tokio::test]
async fn given_video_without_audio_track_when_extracting_then_zero_fallback_is_saved() {
    let store = Arc::new(RecordingFeatureStore::default());
    let service = service_with_demuxer(StubDemuxer { audio_wav: None }, Arc::clone(&store));

    service.extract("silent.mp4").await.unwrap();

    let audio = store.saved_audio.lock().await;
    let (_, feature) = audio.as_ref().unwrap();
    assert!(feature.is_zero());
    assert_eq!(feature.num_segments(), 1);
}

#[tokio::test]
async fn given_demux_failure_when_extracting_then_error_propagates_and_nothing_is_saved() {
    let store = Arc::new(RecordingFeatureStore::default());
    let service = service_with_demuxer(FailingDemuxer, Arc::clone(&store));

    let result = service.extract("broken.mp4").await;
    assert!(matches!(result, Err(ExtractionError::Demuxing(_))));
    assert!(store.saved_video.lock().await.is_none());
    assert!(store.saved_audio.lock().await.is_none());
}

#[tokio::test]
async fn given_filename_without_usable_stem_when_extracting_then_invalid_filename_is_reported() {
    let store = Arc::new(RecordingFeatureStore::default());
    let service = service_with_demuxer(StubDemuxer { audio_wav: None }, Arc::clone(&store));

    let result = service.extract("").await;
    assert!(matches!(result, Err(ExtractionError::InvalidFilename(_))));
}

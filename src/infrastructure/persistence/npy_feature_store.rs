use std::fs::File;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ndarray::{Array1, Array2};
use ndarray_npy::{ReadNpyExt, WriteNpyExt};

use crate::application::ports::{FeatureStore, FeatureStoreError};
use crate::domain::{AudioFeature, VideoFeature, VideoId};

/// Feature persistence as `.npy` files: `{id}_video.npy` under the video
/// directory, `{id}_audio.npy` under the audio directory. Single-segment
/// audio is written as a bare `[1024]` vector, matching the extractor
/// output format.
pub struct NpyFeatureStore {
    video_dir: PathBuf,
    audio_dir: PathBuf,
}

impl NpyFeatureStore {
    pub fn new(video_dir: PathBuf, audio_dir: PathBuf) -> Result<Self, FeatureStoreError> {
        std::fs::create_dir_all(&video_dir)?;
        std::fs::create_dir_all(&audio_dir)?;
        Ok(Self {
            video_dir,
            audio_dir,
        })
    }

    fn video_path(&self, id: &VideoId) -> PathBuf {
        self.video_dir.join(format!("{}_video.npy", id))
    }

    fn audio_path(&self, id: &VideoId) -> PathBuf {
        self.audio_dir.join(format!("{}_audio.npy", id))
    }

    fn write_array2(path: &Path, array: &Array2<f32>) -> Result<(), FeatureStoreError> {
        let file = File::create(path)?;
        array
            .write_npy(file)
            .map_err(|e| FeatureStoreError::SerializationFailed(e.to_string()))
    }

    fn open_existing(path: &Path) -> Result<File, FeatureStoreError> {
        if !path.exists() {
            return Err(FeatureStoreError::NotFound(path.display().to_string()));
        }
        Ok(File::open(path)?)
    }
}

#[async_trait]
impl FeatureStore for NpyFeatureStore {
    async fn save_video(
        &self,
        id: &VideoId,
        feature: &VideoFeature,
    ) -> Result<(), FeatureStoreError> {
        let path = self.video_path(id);
        Self::write_array2(&path, feature.as_array())?;
        tracing::debug!(video_id = %id, path = %path.display(), "Video features saved");
        Ok(())
    }

    async fn save_audio(
        &self,
        id: &VideoId,
        feature: &AudioFeature,
    ) -> Result<(), FeatureStoreError> {
        let path = self.audio_path(id);
        if feature.num_segments() == 1 {
            let row: Array1<f32> = feature.as_array().row(0).to_owned();
            let file = File::create(&path)?;
            row.write_npy(file)
                .map_err(|e| FeatureStoreError::SerializationFailed(e.to_string()))?;
        } else {
            Self::write_array2(&path, feature.as_array())?;
        }
        tracing::debug!(video_id = %id, path = %path.display(), "Audio features saved");
        Ok(())
    }

    async fn load_video(&self, id: &VideoId) -> Result<VideoFeature, FeatureStoreError> {
        let path = self.video_path(id);
        let file = Self::open_existing(&path)?;
        let array = Array2::<f32>::read_npy(file)
            .map_err(|e| FeatureStoreError::SerializationFailed(e.to_string()))?;
        VideoFeature::new(array).map_err(|e| FeatureStoreError::InvalidShape(e.to_string()))
    }

    async fn load_audio(&self, id: &VideoId) -> Result<AudioFeature, FeatureStoreError> {
        let path = self.audio_path(id);

        // Stored either as a bare vector or as a per-segment matrix.
        let file = Self::open_existing(&path)?;
        if let Ok(matrix) = Array2::<f32>::read_npy(file) {
            return AudioFeature::new(matrix)
                .map_err(|e| FeatureStoreError::InvalidShape(e.to_string()));
        }

        let file = Self::open_existing(&path)?;
        let vector = Array1::<f32>::read_npy(file)
            .map_err(|e| FeatureStoreError::SerializationFailed(e.to_string()))?;
        AudioFeature::from_vector(vector.to_vec())
            .map_err(|e| FeatureStoreError::InvalidShape(e.to_string()))
    }
}

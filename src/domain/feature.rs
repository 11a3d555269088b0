use ndarray::Array2;

/// Per-frame embedding width produced by the vision tower.
pub const VIDEO_FEATURE_DIM: usize = 1408;
/// Fixed audio embedding width after pooling and padding.
pub const AUDIO_FEATURE_DIM: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum FeatureShapeError {
    #[error("video feature must have at least one frame")]
    EmptyVideo,
    #[error("video feature dim {0} does not match contract {VIDEO_FEATURE_DIM}")]
    VideoDim(usize),
    #[error("audio feature dim {0} does not match contract {AUDIO_FEATURE_DIM}")]
    AudioDim(usize),
}

/// Ordered sequence of frame embeddings, `[num_frames, 1408]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFeature {
    frames: Array2<f32>,
}

impl VideoFeature {
    pub fn new(frames: Array2<f32>) -> Result<Self, FeatureShapeError> {
        if frames.nrows() == 0 {
            return Err(FeatureShapeError::EmptyVideo);
        }
        if frames.ncols() != VIDEO_FEATURE_DIM {
            return Err(FeatureShapeError::VideoDim(frames.ncols()));
        }
        Ok(Self { frames })
    }

    pub fn num_frames(&self) -> usize {
        self.frames.nrows()
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.frames
    }

    pub fn into_array(self) -> Array2<f32> {
        self.frames
    }
}

/// Audio embedding, `[num_segments, 1024]`. Single-vector features are
/// promoted to one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFeature {
    segments: Array2<f32>,
}

impl AudioFeature {
    pub fn new(segments: Array2<f32>) -> Result<Self, FeatureShapeError> {
        if segments.ncols() != AUDIO_FEATURE_DIM {
            return Err(FeatureShapeError::AudioDim(segments.ncols()));
        }
        Ok(Self { segments })
    }

    pub fn from_vector(values: Vec<f32>) -> Result<Self, FeatureShapeError> {
        if values.len() != AUDIO_FEATURE_DIM {
            return Err(FeatureShapeError::AudioDim(values.len()));
        }
        let segments = Array2::from_shape_vec((1, AUDIO_FEATURE_DIM), values)
            .map_err(|_| FeatureShapeError::AudioDim(0))?;
        Ok(Self { segments })
    }

    /// Silent-track fallback: one all-zero segment.
    pub fn zero_fallback() -> Self {
        Self {
            segments: Array2::zeros((1, AUDIO_FEATURE_DIM)),
        }
    }

    pub fn num_segments(&self) -> usize {
        self.segments.nrows()
    }

    pub fn is_zero(&self) -> bool {
        self.segments.iter().all(|v| *v == 0.0)
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.segments
    }

    pub fn into_array(self) -> Array2<f32> {
        self.segments
    }
}

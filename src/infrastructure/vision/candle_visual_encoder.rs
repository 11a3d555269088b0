use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use ndarray::Array2;

use crate::application::ports::{VisualEncoder, VisualEncoderError};
use crate::domain::{VideoFeature, VIDEO_FEATURE_DIM};

use super::eva_vit::{VisionTower, VisionTowerConfig};

// Normalization constants the vision tower was trained with.
const PIXEL_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];
const PIXEL_STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_11];

const FRAME_BATCH: usize = 8;

/// Runs the pretrained vision tower over demuxed frames and takes the
/// CLS embedding per frame.
pub struct CandleVisualEncoder {
    tower: VisionTower,
    config: VisionTowerConfig,
    device: Device,
}

impl CandleVisualEncoder {
    pub fn new(model_id: &str) -> Result<Self, VisualEncoderError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle vision tower"
        );

        let api = Api::new().map_err(|e| VisualEncoderError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            VisualEncoderError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config = Self::parse_vision_config(&config_contents)?;

        if config.hidden_size != VIDEO_FEATURE_DIM {
            return Err(VisualEncoderError::ModelLoadFailed(format!(
                "vision tower hidden size {} does not match feature contract {}",
                config.hidden_size, VIDEO_FEATURE_DIM
            )));
        }

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let tower = VisionTower::load(&config, vb.pp("vision_model"))
            .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle vision tower loaded successfully");

        Ok(Self {
            tower,
            config,
            device,
        })
    }

    /// The tower parameters sit under `vision_config` in the published
    /// checkpoints; standalone configs keep them at the top level.
    fn parse_vision_config(contents: &str) -> Result<VisionTowerConfig, VisualEncoderError> {
        let value: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("parse config: {}", e)))?;
        let section = value.get("vision_config").cloned().unwrap_or(value);
        serde_json::from_value(section)
            .map_err(|e| VisualEncoderError::ModelLoadFailed(format!("vision config: {}", e)))
    }

    fn preprocess_frame(&self, jpeg: &[u8]) -> Result<Vec<f32>, VisualEncoderError> {
        let img = image::load_from_memory(jpeg)
            .map_err(|e| VisualEncoderError::FrameDecodingFailed(e.to_string()))?
            .resize_exact(
                self.config.image_size as u32,
                self.config.image_size as u32,
                image::imageops::FilterType::CatmullRom,
            )
            .to_rgb8();

        let side = self.config.image_size;
        let mut chw = vec![0f32; 3 * side * side];
        for (x, y, pixel) in img.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                chw[c * side * side + y * side + x] =
                    (pixel.0[c] as f32 / 255.0 - PIXEL_MEAN[c]) / PIXEL_STD[c];
            }
        }
        Ok(chw)
    }

    fn encode_batch(&self, frames: &[Vec<u8>]) -> Result<Vec<Vec<f32>>, VisualEncoderError> {
        let side = self.config.image_size;
        let mut pixels = Vec::with_capacity(frames.len() * 3 * side * side);
        for jpeg in frames {
            pixels.extend(self.preprocess_frame(jpeg)?);
        }

        let batch = Tensor::from_vec(pixels, (frames.len(), 3, side, side), &self.device)
            .map_err(|e| VisualEncoderError::InferenceFailed(format!("pixel tensor: {}", e)))?;

        let cls = self
            .tower
            .forward_cls(&batch)
            .map_err(|e| VisualEncoderError::InferenceFailed(format!("vision tower: {}", e)))?;

        let rows = cls
            .to_vec2::<f32>()
            .map_err(|e| VisualEncoderError::InferenceFailed(format!("readback: {}", e)))?;
        Ok(rows)
    }
}

#[async_trait]
impl VisualEncoder for CandleVisualEncoder {
    async fn encode_frames(&self, frames: &[Vec<u8>]) -> Result<VideoFeature, VisualEncoderError> {
        if frames.is_empty() {
            return Err(VisualEncoderError::NoFrames);
        }

        let mut all_rows: Vec<f32> = Vec::with_capacity(frames.len() * VIDEO_FEATURE_DIM);
        for chunk in frames.chunks(FRAME_BATCH) {
            for row in self.encode_batch(chunk)? {
                all_rows.extend(row);
            }
        }

        let features = Array2::from_shape_vec((frames.len(), VIDEO_FEATURE_DIM), all_rows)
            .map_err(|e| VisualEncoderError::InferenceFailed(format!("feature shape: {}", e)))?;

        tracing::debug!(frames = frames.len(), "Visual features extracted");

        VideoFeature::new(features)
            .map_err(|e| VisualEncoderError::InferenceFailed(e.to_string()))
    }
}

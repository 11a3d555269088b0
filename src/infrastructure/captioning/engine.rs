use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use tokenizers::Tokenizer;

use crate::application::ports::{Captioner, CaptionerError, GeneratedCaption};
use crate::domain::{AudioFeature, Caption, VideoFeature};

use super::config::CaptionEngineConfig;
use super::generate::GreedySession;
use super::model::FusionCaptionModel;

/// Candle-backed caption engine: trained fusion weights plus the
/// matching tokenizer, loaded once and immutable afterwards.
pub struct CandleCaptionEngine {
    model: FusionCaptionModel,
    tokenizer: Tokenizer,
    device: Device,
    max_decode_steps: usize,
}

impl CandleCaptionEngine {
    pub fn new(cfg: &CaptionEngineConfig) -> Result<Self, CaptionerError> {
        let device = Device::Cpu;

        tracing::info!(
            weights = %cfg.weights_path.display(),
            tokenizer = %cfg.tokenizer_path.display(),
            "Initializing Candle caption engine"
        );

        let tokenizer = Tokenizer::from_file(&cfg.tokenizer_path)
            .map_err(|e| CaptionerError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[cfg.weights_path.clone()], DType::F32, &device)
                .map_err(|e| CaptionerError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = FusionCaptionModel::load(cfg.model.clone(), vb)
            .map_err(|e| CaptionerError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle caption engine loaded successfully");

        Ok(Self {
            model,
            tokenizer,
            device,
            max_decode_steps: cfg.model.max_decode_steps,
        })
    }

    fn features_to_tensors(
        &self,
        video: &VideoFeature,
        audio: &AudioFeature,
    ) -> Result<(Tensor, Tensor), CaptionerError> {
        let v_arr = video.as_array();
        let (t_v, v_dim) = v_arr.dim();
        let v_data: Vec<f32> = v_arr.iter().copied().collect();
        let v = Tensor::from_vec(v_data, (1, t_v, v_dim), &self.device)
            .map_err(|e| CaptionerError::InferenceFailed(format!("video tensor: {}", e)))?;

        let a_arr = audio.as_array();
        let (t_a, a_dim) = a_arr.dim();
        let a_data: Vec<f32> = a_arr.iter().copied().collect();
        let a = Tensor::from_vec(a_data, (1, t_a, a_dim), &self.device)
            .map_err(|e| CaptionerError::InferenceFailed(format!("audio tensor: {}", e)))?;

        Ok((v, a))
    }
}

#[async_trait]
impl Captioner for CandleCaptionEngine {
    async fn generate(
        &self,
        video: &VideoFeature,
        audio: &AudioFeature,
    ) -> Result<GeneratedCaption, CaptionerError> {
        let (v, a) = self.features_to_tensors(video, audio)?;

        let memory = self
            .model
            .encode(&v, &a)
            .map_err(|e| CaptionerError::InferenceFailed(format!("encoder: {}", e)))?;

        let mut session = GreedySession::new(self.max_decode_steps);
        session.begin();

        while !session.is_terminated() {
            let prefix = session.tokens().as_slice();
            let tokens = Tensor::new(prefix, &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| CaptionerError::InferenceFailed(format!("token tensor: {}", e)))?;

            let last_logits = self
                .model
                .decode_last(&tokens, &memory)
                .map_err(|e| CaptionerError::InferenceFailed(format!("decoder: {}", e)))?;

            let next_token = last_logits
                .squeeze(0)
                .and_then(|t| t.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(|e| CaptionerError::InferenceFailed(format!("argmax: {}", e)))?;

            session.advance(next_token);
        }

        let tokens = session.into_tokens();
        let content = tokens.content_tokens();

        let text = if content.is_empty() {
            String::new()
        } else {
            self.tokenizer
                .decode(&content, true)
                .map_err(|e| CaptionerError::DetokenizationFailed(e.to_string()))?
        };

        let caption = Caption::from_decoded(text);

        tracing::debug!(
            tokens = tokens.len(),
            caption = %caption,
            "Greedy decode finished"
        );

        Ok(GeneratedCaption { tokens, caption })
    }
}

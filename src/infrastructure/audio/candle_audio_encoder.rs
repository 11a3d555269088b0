use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokio::sync::Mutex;

use crate::application::ports::{AudioEncoder, AudioEncoderError};
use crate::domain::{AudioFeature, AUDIO_FEATURE_DIM};

use super::pcm_decoder::decode_audio_to_pcm;

/// Pools a pretrained speech transformer encoder into the fixed
/// 1024-dim audio feature: per-chunk mel spectrogram, encoder forward,
/// mean over time, averaged across chunks, zero-padded to the contract.
pub struct CandleAudioEncoder {
    model: Mutex<m::model::Whisper>,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleAudioEncoder {
    pub fn new(model_id: &str) -> Result<Self, AudioEncoderError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle speech encoder"
        );

        let api = Api::new().map_err(|e| AudioEncoderError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("model.safetensors: {}", e)))?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| AudioEncoderError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Candle speech encoder loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            config,
            device,
            mel_filters,
        })
    }

    fn pooled_embedding(
        &self,
        model: &mut m::model::Whisper,
        samples: &[f32],
    ) -> Result<Vec<f32>, AudioEncoderError> {
        let mel_data = m::audio::pcm_to_mel(&self.config, samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        let mel = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| AudioEncoderError::InferenceFailed(format!("mel tensor: {}", e)))?;

        let hidden = model
            .encoder
            .forward(&mel, true)
            .map_err(|e| AudioEncoderError::InferenceFailed(format!("encoder: {}", e)))?;

        // [1, T, d_model] -> mean over time -> [d_model]
        let pooled = hidden
            .mean(1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_dtype(candle_core::DType::F32))
            .map_err(|e| AudioEncoderError::InferenceFailed(format!("pooling: {}", e)))?;

        pooled
            .to_vec1::<f32>()
            .map_err(|e| AudioEncoderError::InferenceFailed(format!("readback: {}", e)))
    }
}

#[async_trait]
impl AudioEncoder for CandleAudioEncoder {
    async fn encode(&self, audio: &[u8]) -> Result<AudioFeature, AudioEncoderError> {
        let pcm = decode_audio_to_pcm(audio)?;

        let chunk_samples = m::N_SAMPLES;
        let mut model = self.model.lock().await;

        let mut sum: Vec<f32> = Vec::new();
        let mut chunks = 0usize;

        for chunk in pcm.chunks(chunk_samples) {
            let samples = if chunk.len() < chunk_samples {
                let mut padded = chunk.to_vec();
                padded.resize(chunk_samples, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let embedding = self.pooled_embedding(&mut model, &samples)?;
            if sum.is_empty() {
                sum = embedding;
            } else {
                for (acc, v) in sum.iter_mut().zip(embedding.iter()) {
                    *acc += v;
                }
            }
            chunks += 1;
        }

        if chunks == 0 {
            return Err(AudioEncoderError::DecodingFailed(
                "no audio content to encode".to_string(),
            ));
        }

        for v in sum.iter_mut() {
            *v /= chunks as f32;
        }

        // Zero-pad or truncate into the fixed 1024-dim contract.
        let mut padded = vec![0f32; AUDIO_FEATURE_DIM];
        let n = sum.len().min(AUDIO_FEATURE_DIM);
        padded[..n].copy_from_slice(&sum[..n]);

        tracing::debug!(chunks, embedding_dim = n, "Audio features extracted");

        AudioFeature::from_vector(padded).map_err(|e| AudioEncoderError::InferenceFailed(e.to_string()))
    }
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, AudioEncoderError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(AudioEncoderError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}

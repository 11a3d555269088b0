use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{AUDIO_FEATURE_DIM, VIDEO_FEATURE_DIM};

/// Architecture hyperparameters of the fusion encoder and caption decoder.
///
/// The defaults match the trained checkpoint; changing them without
/// retraining makes the weights unloadable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FusionModelConfig {
    pub video_dim: usize,
    pub audio_dim: usize,
    pub hidden_dim: usize,
    pub vocab_size: usize,
    pub encoder_layers: usize,
    pub decoder_layers: usize,
    pub num_heads: usize,
    pub decoder_ffn_dim: usize,
    pub max_positions: usize,
    pub max_decode_steps: usize,
}

impl Default for FusionModelConfig {
    fn default() -> Self {
        Self {
            video_dim: VIDEO_FEATURE_DIM,
            audio_dim: AUDIO_FEATURE_DIM,
            hidden_dim: 768,
            vocab_size: 8000,
            encoder_layers: 4,
            decoder_layers: 4,
            num_heads: 8,
            decoder_ffn_dim: 2048,
            max_positions: 320,
            max_decode_steps: 30,
        }
    }
}

impl FusionModelConfig {
    /// Encoder feed-forward width, fixed at 4x the hidden size.
    pub fn encoder_ffn_dim(&self) -> usize {
        self.hidden_dim * 4
    }
}

/// Filesystem locations of the trained artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionEngineConfig {
    pub weights_path: PathBuf,
    pub tokenizer_path: PathBuf,
    #[serde(default)]
    pub model: FusionModelConfig,
}

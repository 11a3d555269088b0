use candle_core::{Result, Tensor};
use candle_nn::VarBuilder;

use super::config::FusionModelConfig;
use super::decoder::CaptionDecoder;
use super::fusion::FusionEncoder;

/// Fusion encoder plus caption decoder behind one weight namespace.
///
/// The model is immutable after load; every forward pass recomputes the
/// full prefix, so no per-request state exists.
#[derive(Debug, Clone)]
pub struct FusionCaptionModel {
    encoder: FusionEncoder,
    decoder: CaptionDecoder,
    config: FusionModelConfig,
}

impl FusionCaptionModel {
    pub fn load(cfg: FusionModelConfig, vb: VarBuilder) -> Result<Self> {
        let encoder = FusionEncoder::load(&cfg, vb.pp("encoder"))?;
        let decoder = CaptionDecoder::load(&cfg, vb.pp("decoder"))?;
        Ok(Self {
            encoder,
            decoder,
            config: cfg,
        })
    }

    pub fn config(&self) -> &FusionModelConfig {
        &self.config
    }

    /// Runs the fusion encoder and concatenates both refined sequences
    /// along time into the decoder memory, `[B, T_v + T_a, hidden]`.
    pub fn encode(&self, video: &Tensor, audio: &Tensor) -> Result<Tensor> {
        let (v, a) = self.encoder.forward(video, audio, None, None)?;
        Tensor::cat(&[&v, &a], 1)
    }

    /// Logits over the vocabulary for every position of `tokens`.
    pub fn decode(&self, tokens: &Tensor, memory: &Tensor) -> Result<Tensor> {
        self.decoder.forward(tokens, memory, None)
    }

    /// Logits at the last position only, `[B, vocab]`.
    pub fn decode_last(&self, tokens: &Tensor, memory: &Tensor) -> Result<Tensor> {
        let logits = self.decode(tokens, memory)?;
        let seq_len = logits.dim(1)?;
        logits.narrow(1, seq_len - 1, 1)?.squeeze(1)
    }
}

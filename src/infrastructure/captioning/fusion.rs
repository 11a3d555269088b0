use candle_core::{Result, Tensor};
use candle_nn::{linear, Linear, VarBuilder};

use super::config::FusionModelConfig;
use super::layers::{CrossAttentionBlock, PositionalEmbedding};

/// Dual cross-attention encoder.
///
/// Both modalities are projected into the shared hidden space, given
/// learned positions, then refined by alternating blocks: video attends
/// to audio as context, audio attends to the refined video.
#[derive(Debug, Clone)]
pub struct FusionEncoder {
    v_proj: Linear,
    a_proj: Linear,
    pos_embed: PositionalEmbedding,
    v2a_blocks: Vec<CrossAttentionBlock>,
    a2v_blocks: Vec<CrossAttentionBlock>,
}

impl FusionEncoder {
    pub fn load(cfg: &FusionModelConfig, vb: VarBuilder) -> Result<Self> {
        let dim = cfg.hidden_dim;
        let v_proj = linear(cfg.video_dim, dim, vb.pp("v_proj"))?;
        let a_proj = linear(cfg.audio_dim, dim, vb.pp("a_proj"))?;
        let pos_embed = PositionalEmbedding::new(cfg.max_positions, dim, vb.pp("pos"))?;

        let mut v2a_blocks = Vec::with_capacity(cfg.encoder_layers);
        let mut a2v_blocks = Vec::with_capacity(cfg.encoder_layers);
        for i in 0..cfg.encoder_layers {
            v2a_blocks.push(CrossAttentionBlock::new(
                dim,
                cfg.num_heads,
                cfg.encoder_ffn_dim(),
                vb.pp(format!("v2a.{i}")),
            )?);
            a2v_blocks.push(CrossAttentionBlock::new(
                dim,
                cfg.num_heads,
                cfg.encoder_ffn_dim(),
                vb.pp(format!("a2v.{i}")),
            )?);
        }

        Ok(Self {
            v_proj,
            a_proj,
            pos_embed,
            v2a_blocks,
            a2v_blocks,
        })
    }

    /// Refines `[B, T_v, video_dim]` and `[B, T_a, audio_dim]` into two
    /// `[B, _, hidden]` sequences. Masks are additive key-padding masks
    /// over the respective context sequence.
    pub fn forward(
        &self,
        video: &Tensor,
        audio: &Tensor,
        video_mask: Option<&Tensor>,
        audio_mask: Option<&Tensor>,
    ) -> Result<(Tensor, Tensor)> {
        let mut v = self.pos_embed.forward(&video.apply(&self.v_proj)?)?;
        let mut a = self.pos_embed.forward(&audio.apply(&self.a_proj)?)?;

        for (v2a, a2v) in self.v2a_blocks.iter().zip(self.a2v_blocks.iter()) {
            v = v2a.forward(&v, &a, audio_mask)?;
            a = a2v.forward(&a, &v, video_mask)?;
        }

        Ok((v, a))
    }
}

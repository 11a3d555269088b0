use candle_core::{DType, Device, Result, Tensor};
use candle_nn::{embedding, layer_norm, linear, Embedding, LayerNorm, Linear, Module, VarBuilder};

use super::config::FusionModelConfig;
use super::layers::{FeedForward, MultiHeadAttention, PositionalEmbedding};

#[derive(Debug, Clone)]
struct DecoderLayer {
    self_attn: MultiHeadAttention,
    self_attn_norm: LayerNorm,
    cross_attn: MultiHeadAttention,
    cross_attn_norm: LayerNorm,
    ff: FeedForward,
    final_norm: LayerNorm,
}

impl DecoderLayer {
    fn load(cfg: &FusionModelConfig, vb: VarBuilder) -> Result<Self> {
        let dim = cfg.hidden_dim;
        let self_attn = MultiHeadAttention::new(dim, cfg.num_heads, vb.pp("self_attn"))?;
        let self_attn_norm = layer_norm(dim, 1e-5, vb.pp("self_attn_norm"))?;
        let cross_attn = MultiHeadAttention::new(dim, cfg.num_heads, vb.pp("cross_attn"))?;
        let cross_attn_norm = layer_norm(dim, 1e-5, vb.pp("cross_attn_norm"))?;
        let ff = FeedForward::new(dim, cfg.decoder_ffn_dim, vb.pp("ff"))?;
        let final_norm = layer_norm(dim, 1e-5, vb.pp("final_norm"))?;
        Ok(Self {
            self_attn,
            self_attn_norm,
            cross_attn,
            cross_attn_norm,
            ff,
            final_norm,
        })
    }

    fn forward(
        &self,
        xs: &Tensor,
        memory: &Tensor,
        causal_mask: &Tensor,
        memory_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let attn = self.self_attn.forward(xs, xs, Some(causal_mask))?;
        let xs = self.self_attn_norm.forward(&(xs + attn)?)?;

        let attn = self.cross_attn.forward(&xs, memory, memory_mask)?;
        let xs = self.cross_attn_norm.forward(&(xs + attn)?)?;

        let ff = self.ff.forward(&xs)?;
        self.final_norm.forward(&(xs + ff)?)
    }
}

/// Causal transformer decoder over token ids, cross-attending to the
/// fused encoder memory, projecting to vocabulary logits.
#[derive(Debug, Clone)]
pub struct CaptionDecoder {
    embed_tokens: Embedding,
    pos_embed: PositionalEmbedding,
    layers: Vec<DecoderLayer>,
    out_proj: Linear,
}

impl CaptionDecoder {
    pub fn load(cfg: &FusionModelConfig, vb: VarBuilder) -> Result<Self> {
        let dim = cfg.hidden_dim;
        let embed_tokens = embedding(cfg.vocab_size, dim, vb.pp("embed_tokens"))?;
        let pos_embed = PositionalEmbedding::new(cfg.max_positions, dim, vb.pp("pos"))?;
        let mut layers = Vec::with_capacity(cfg.decoder_layers);
        for i in 0..cfg.decoder_layers {
            layers.push(DecoderLayer::load(cfg, vb.pp(format!("layers.{i}")))?);
        }
        let out_proj = linear(dim, cfg.vocab_size, vb.pp("out_proj"))?;
        Ok(Self {
            embed_tokens,
            pos_embed,
            layers,
            out_proj,
        })
    }

    /// `tokens` is `[B, T]` of ids; returns `[B, T, vocab]` logits.
    pub fn forward(
        &self,
        tokens: &Tensor,
        memory: &Tensor,
        memory_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let (_b_sz, seq_len) = tokens.dims2()?;
        let causal = causal_mask(seq_len, tokens.device())?;

        let mut xs = self
            .pos_embed
            .forward(&self.embed_tokens.forward(tokens)?)?;
        for layer in &self.layers {
            xs = layer.forward(&xs, memory, &causal, memory_mask)?;
        }
        xs.apply(&self.out_proj)
    }
}

/// Upper-triangular additive mask restricting attention to non-future
/// positions.
fn causal_mask(seq_len: usize, device: &Device) -> Result<Tensor> {
    let mask: Vec<f32> = (0..seq_len)
        .flat_map(|i| (0..seq_len).map(move |j| if j > i { f32::NEG_INFINITY } else { 0. }))
        .collect();
    Tensor::from_vec(mask, (seq_len, seq_len), device)?.to_dtype(DType::F32)
}

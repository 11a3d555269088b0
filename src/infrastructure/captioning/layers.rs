use candle_core::{Result, Tensor};
use candle_nn::{embedding, layer_norm, linear, Embedding, LayerNorm, Linear, Module, VarBuilder};

/// Learned positional embedding added to a `[B, T, D]` sequence.
#[derive(Debug, Clone)]
pub struct PositionalEmbedding {
    weights: Embedding,
}

impl PositionalEmbedding {
    pub fn new(max_positions: usize, dim: usize, vb: VarBuilder) -> Result<Self> {
        let weights = embedding(max_positions, dim, vb.pp("embed"))?;
        Ok(Self { weights })
    }

    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let (_b_sz, seq_len, _dim) = xs.dims3()?;
        let positions = Tensor::arange(0u32, seq_len as u32, xs.device())?;
        let pos_embed = self.weights.forward(&positions)?.unsqueeze(0)?;
        xs.broadcast_add(&pos_embed)
    }
}

/// Multi-head attention; queries come from `xs`, keys/values from `kv`.
///
/// `attn_mask` is additive (`0` keep, `-inf` drop) and must broadcast
/// against `[B * heads, T_q, T_k]`.
#[derive(Debug, Clone)]
pub struct MultiHeadAttention {
    q_proj: Linear,
    k_proj: Linear,
    v_proj: Linear,
    out_proj: Linear,
    num_heads: usize,
    head_dim: usize,
    scaling: f64,
}

impl MultiHeadAttention {
    pub fn new(dim: usize, num_heads: usize, vb: VarBuilder) -> Result<Self> {
        let head_dim = dim / num_heads;
        let q_proj = linear(dim, dim, vb.pp("q_proj"))?;
        let k_proj = linear(dim, dim, vb.pp("k_proj"))?;
        let v_proj = linear(dim, dim, vb.pp("v_proj"))?;
        let out_proj = linear(dim, dim, vb.pp("out_proj"))?;
        Ok(Self {
            q_proj,
            k_proj,
            v_proj,
            out_proj,
            num_heads,
            head_dim,
            scaling: 1. / (head_dim as f64).sqrt(),
        })
    }

    fn shape_heads(&self, tensor: &Tensor, b_sz: usize) -> Result<Tensor> {
        tensor
            .reshape((b_sz, (), self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()
    }

    pub fn forward(&self, xs: &Tensor, kv: &Tensor, attn_mask: Option<&Tensor>) -> Result<Tensor> {
        let (b_sz, q_len, _) = xs.dims3()?;
        let query = (xs.apply(&self.q_proj)? * self.scaling)?;
        let key = self.shape_heads(&kv.apply(&self.k_proj)?, b_sz)?;
        let value = self.shape_heads(&kv.apply(&self.v_proj)?, b_sz)?;

        let proj_shape = (b_sz * self.num_heads, (), self.head_dim);
        let query = self.shape_heads(&query, b_sz)?.reshape(proj_shape)?;
        let key = key.reshape(proj_shape)?;
        let value = value.reshape(proj_shape)?;

        let attn_weights = query.matmul(&key.transpose(1, 2)?)?;
        let attn_weights = match attn_mask {
            None => attn_weights,
            Some(mask) => attn_weights.broadcast_add(mask)?,
        };
        let attn_probs = candle_nn::ops::softmax_last_dim(&attn_weights)?;
        let attn_output = attn_probs.matmul(&value)?;

        attn_output
            .reshape((b_sz, self.num_heads, q_len, self.head_dim))?
            .transpose(1, 2)?
            .reshape((b_sz, q_len, self.head_dim * self.num_heads))?
            .apply(&self.out_proj)
    }
}

/// Position-wise feed-forward sublayer with ReLU activation.
#[derive(Debug, Clone)]
pub struct FeedForward {
    fc1: Linear,
    fc2: Linear,
}

impl FeedForward {
    pub fn new(dim: usize, ffn_dim: usize, vb: VarBuilder) -> Result<Self> {
        let fc1 = linear(dim, ffn_dim, vb.pp("fc1"))?;
        let fc2 = linear(ffn_dim, dim, vb.pp("fc2"))?;
        Ok(Self { fc1, fc2 })
    }
}

impl Module for FeedForward {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        xs.apply(&self.fc1)?.relu()?.apply(&self.fc2)
    }
}

/// One fusion block: cross-attention into the other modality, then a
/// feed-forward sublayer, both with residual + post-norm.
#[derive(Debug, Clone)]
pub struct CrossAttentionBlock {
    attn: MultiHeadAttention,
    norm1: LayerNorm,
    ff: FeedForward,
    norm2: LayerNorm,
}

impl CrossAttentionBlock {
    pub fn new(dim: usize, num_heads: usize, ffn_dim: usize, vb: VarBuilder) -> Result<Self> {
        let attn = MultiHeadAttention::new(dim, num_heads, vb.pp("attn"))?;
        let norm1 = layer_norm(dim, 1e-5, vb.pp("norm1"))?;
        let ff = FeedForward::new(dim, ffn_dim, vb.pp("ff"))?;
        let norm2 = layer_norm(dim, 1e-5, vb.pp("norm2"))?;
        Ok(Self {
            attn,
            norm1,
            ff,
            norm2,
        })
    }

    pub fn forward(&self, q: &Tensor, kv: &Tensor, kv_mask: Option<&Tensor>) -> Result<Tensor> {
        let attn_out = self.attn.forward(q, kv, kv_mask)?;
        let xs = self.norm1.forward(&(q + attn_out)?)?;
        let ff_out = self.ff.forward(&xs)?;
        self.norm2.forward(&(xs + ff_out)?)
    }
}

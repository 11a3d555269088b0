use candle_core::{Result, Tensor, D};
use candle_nn::{
    conv2d, layer_norm, linear, Conv2d, Conv2dConfig, LayerNorm, Linear, Module, VarBuilder,
};
use serde::Deserialize;

/// BLIP-2-class EVA vision transformer. The 1408-wide CLS embedding of
/// the final hidden state is the per-frame feature contract.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VisionTowerConfig {
    pub hidden_size: usize,
    pub intermediate_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub image_size: usize,
    pub patch_size: usize,
    pub layer_norm_eps: f64,
}

impl Default for VisionTowerConfig {
    fn default() -> Self {
        Self {
            hidden_size: 1408,
            intermediate_size: 6144,
            num_hidden_layers: 39,
            num_attention_heads: 16,
            image_size: 224,
            patch_size: 14,
            layer_norm_eps: 1e-6,
        }
    }
}

#[derive(Debug, Clone)]
struct VisionEmbeddings {
    class_embedding: Tensor,
    patch_embedding: Conv2d,
    position_embedding: Tensor,
}

impl VisionEmbeddings {
    fn load(cfg: &VisionTowerConfig, vb: VarBuilder) -> Result<Self> {
        let class_embedding = vb.get((1, 1, cfg.hidden_size), "class_embedding")?;
        let conv_cfg = Conv2dConfig {
            stride: cfg.patch_size,
            ..Default::default()
        };
        let patch_embedding = conv2d(
            3,
            cfg.hidden_size,
            cfg.patch_size,
            conv_cfg,
            vb.pp("patch_embedding"),
        )?;
        let num_patches_side = cfg.image_size / cfg.patch_size;
        let num_positions = num_patches_side * num_patches_side + 1;
        let position_embedding =
            vb.get((1, num_positions, cfg.hidden_size), "position_embedding")?;
        Ok(Self {
            class_embedding,
            patch_embedding,
            position_embedding,
        })
    }

    fn forward(&self, pixel_values: &Tensor) -> Result<Tensor> {
        let b_sz = pixel_values.dim(0)?;
        let patch_embeds = pixel_values
            .apply(&self.patch_embedding)?
            .flatten_from(2)?
            .t()?;
        let d = self.class_embedding.dim(D::Minus1)?;
        let class_embeds = self.class_embedding.broadcast_as((b_sz, 1, d))?;
        let embeddings = Tensor::cat(&[&class_embeds, &patch_embeds], 1)?;
        let position_embedding = self.position_embedding.narrow(1, 0, embeddings.dim(1)?)?;
        embeddings.broadcast_add(&position_embedding)
    }
}

#[derive(Debug, Clone)]
struct Attention {
    qkv: Linear,
    projection: Linear,
    num_heads: usize,
    head_dim: usize,
    scale: f64,
}

impl Attention {
    fn load(cfg: &VisionTowerConfig, vb: VarBuilder) -> Result<Self> {
        let dim = cfg.hidden_size;
        let num_heads = cfg.num_attention_heads;
        let head_dim = dim / num_heads;
        let qkv = linear(dim, dim * 3, vb.pp("qkv"))?;
        let projection = linear(dim, dim, vb.pp("projection"))?;
        Ok(Self {
            qkv,
            projection,
            num_heads,
            head_dim,
            scale: 1. / (head_dim as f64).sqrt(),
        })
    }

    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let (b_sz, seq_len, dim) = xs.dims3()?;
        let qkv = xs
            .apply(&self.qkv)?
            .reshape((b_sz, seq_len, 3, self.num_heads, self.head_dim))?
            .permute((2, 0, 3, 1, 4))?;
        let query = qkv.get(0)?.contiguous()?;
        let key = qkv.get(1)?.contiguous()?;
        let value = qkv.get(2)?.contiguous()?;

        let attn_weights = (query.matmul(&key.transpose(D::Minus2, D::Minus1)?)? * self.scale)?;
        let attn_probs = candle_nn::ops::softmax_last_dim(&attn_weights)?;
        attn_probs
            .matmul(&value)?
            .transpose(1, 2)?
            .reshape((b_sz, seq_len, dim))?
            .apply(&self.projection)
    }
}

#[derive(Debug, Clone)]
struct Mlp {
    fc1: Linear,
    fc2: Linear,
}

impl Mlp {
    fn load(cfg: &VisionTowerConfig, vb: VarBuilder) -> Result<Self> {
        let fc1 = linear(cfg.hidden_size, cfg.intermediate_size, vb.pp("fc1"))?;
        let fc2 = linear(cfg.intermediate_size, cfg.hidden_size, vb.pp("fc2"))?;
        Ok(Self { fc1, fc2 })
    }
}

impl Module for Mlp {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        xs.apply(&self.fc1)?.gelu_erf()?.apply(&self.fc2)
    }
}

#[derive(Debug, Clone)]
struct EncoderLayer {
    self_attn: Attention,
    layer_norm1: LayerNorm,
    mlp: Mlp,
    layer_norm2: LayerNorm,
}

impl EncoderLayer {
    fn load(cfg: &VisionTowerConfig, vb: VarBuilder) -> Result<Self> {
        let self_attn = Attention::load(cfg, vb.pp("self_attn"))?;
        let layer_norm1 = layer_norm(cfg.hidden_size, cfg.layer_norm_eps, vb.pp("layer_norm1"))?;
        let mlp = Mlp::load(cfg, vb.pp("mlp"))?;
        let layer_norm2 = layer_norm(cfg.hidden_size, cfg.layer_norm_eps, vb.pp("layer_norm2"))?;
        Ok(Self {
            self_attn,
            layer_norm1,
            mlp,
            layer_norm2,
        })
    }

    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let residual = xs;
        let xs = self.self_attn.forward(&xs.apply(&self.layer_norm1)?)?;
        let xs = (xs + residual)?;
        let residual = &xs;
        let ys = self.mlp.forward(&xs.apply(&self.layer_norm2)?)?;
        ys + residual
    }
}

#[derive(Debug, Clone)]
pub struct VisionTower {
    embeddings: VisionEmbeddings,
    layers: Vec<EncoderLayer>,
    post_layernorm: LayerNorm,
}

impl VisionTower {
    pub fn load(cfg: &VisionTowerConfig, vb: VarBuilder) -> Result<Self> {
        let embeddings = VisionEmbeddings::load(cfg, vb.pp("embeddings"))?;
        let mut layers = Vec::with_capacity(cfg.num_hidden_layers);
        for i in 0..cfg.num_hidden_layers {
            layers.push(EncoderLayer::load(cfg, vb.pp(format!("layers.{i}")))?);
        }
        let post_layernorm =
            layer_norm(cfg.hidden_size, cfg.layer_norm_eps, vb.pp("post_layernorm"))?;
        Ok(Self {
            embeddings,
            layers,
            post_layernorm,
        })
    }

    /// `pixel_values` is `[B, 3, H, W]`; returns the CLS embeddings,
    /// `[B, hidden]`.
    pub fn forward_cls(&self, pixel_values: &Tensor) -> Result<Tensor> {
        let mut xs = self.embeddings.forward(pixel_values)?;
        for layer in &self.layers {
            xs = layer.forward(&xs)?;
        }
        let xs = xs.apply(&self.post_layernorm)?;
        xs.narrow(1, 0, 1)?.squeeze(1)
    }
}

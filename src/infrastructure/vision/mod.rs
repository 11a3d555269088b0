mod candle_visual_encoder;
mod eva_vit;

pub use candle_visual_encoder::CandleVisualEncoder;
pub use eva_vit::{VisionTower, VisionTowerConfig};

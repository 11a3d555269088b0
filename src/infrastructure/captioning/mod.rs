mod config;
mod decoder;
mod engine;
mod fusion;
mod generate;
mod layers;
mod model;

pub use config::{CaptionEngineConfig, FusionModelConfig};
pub use decoder::CaptionDecoder;
pub use engine::CandleCaptionEngine;
pub use fusion::FusionEncoder;
pub use generate::{DecodeState, GreedySession};
pub use model::FusionCaptionModel;

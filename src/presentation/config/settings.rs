use std::path::PathBuf;

use serde::Deserialize;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub models: ModelSettings,
    pub extraction: ExtractionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_dir: PathBuf,
    pub video_feature_dir: PathBuf,
    pub audio_feature_dir: PathBuf,
    pub caption_log_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub vision_model_id: String,
    pub speech_model_id: String,
    pub caption_weights_path: PathBuf,
    pub tokenizer_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub frame_fps: u32,
    pub frame_size: u32,
    pub max_upload_mb: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parse_or("SERVER_PORT", 3000),
            },
            storage: StorageSettings {
                upload_dir: env_or("UPLOAD_DIR", "uploads").into(),
                video_feature_dir: env_or("VIDEO_FEATURE_DIR", "features/video").into(),
                audio_feature_dir: env_or("AUDIO_FEATURE_DIR", "features/audio").into(),
                caption_log_path: env_or("CAPTION_LOG_PATH", "saved_captions.csv").into(),
            },
            models: ModelSettings {
                vision_model_id: env_or("VISION_MODEL_ID", "Salesforce/blip2-opt-2.7b"),
                speech_model_id: env_or("SPEECH_MODEL_ID", "openai/whisper-base"),
                caption_weights_path: env_or("CAPTION_WEIGHTS_PATH", "models/caption.safetensors")
                    .into(),
                tokenizer_path: env_or("TOKENIZER_PATH", "models/tokenizer.json").into(),
            },
            extraction: ExtractionSettings {
                frame_fps: env_parse_or("FRAME_FPS", 1),
                frame_size: env_parse_or("FRAME_SIZE", 256),
                max_upload_mb: env_parse_or("MAX_UPLOAD_MB", 200),
            },
        }
    }
}

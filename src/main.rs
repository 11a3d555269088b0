use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use vidscribe::application::ports::{CaptionLog, FeatureStore, MediaStore};
use vidscribe::application::services::{CaptioningService, ExtractionService};
use vidscribe::infrastructure::audio::CandleAudioEncoder;
use vidscribe::infrastructure::captioning::{CandleCaptionEngine, CaptionEngineConfig};
use vidscribe::infrastructure::media::{check_ffmpeg_binary, FfmpegDemuxer};
use vidscribe::infrastructure::observability::{init_tracing, TracingConfig};
use vidscribe::infrastructure::persistence::{CsvCaptionLog, NpyFeatureStore};
use vidscribe::infrastructure::storage::LocalMediaStore;
use vidscribe::infrastructure::vision::CandleVisualEncoder;
use vidscribe::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    let environment = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "local".to_string())
        .try_into()
        .unwrap_or(Environment::Local);

    let tracing_config = TracingConfig {
        environment: environment.to_string(),
        ..TracingConfig::default()
    };
    init_tracing(tracing_config, settings.server.port);

    check_ffmpeg_binary().await?;

    let media_store: Arc<dyn MediaStore> =
        Arc::new(LocalMediaStore::new(settings.storage.upload_dir.clone())?);
    let feature_store: Arc<dyn FeatureStore> = Arc::new(NpyFeatureStore::new(
        settings.storage.video_feature_dir.clone(),
        settings.storage.audio_feature_dir.clone(),
    )?);
    let caption_log: Arc<dyn CaptionLog> =
        Arc::new(CsvCaptionLog::new(settings.storage.caption_log_path.clone()));

    let demuxer = Arc::new(FfmpegDemuxer::new(
        settings.extraction.frame_fps,
        settings.extraction.frame_size,
    ));
    let visual_encoder = Arc::new(CandleVisualEncoder::new(&settings.models.vision_model_id)?);
    let audio_encoder = Arc::new(CandleAudioEncoder::new(&settings.models.speech_model_id)?);

    let engine_config = CaptionEngineConfig {
        weights_path: settings.models.caption_weights_path.clone(),
        tokenizer_path: settings.models.tokenizer_path.clone(),
        model: Default::default(),
    };
    let caption_engine = Arc::new(CandleCaptionEngine::new(&engine_config)?);

    let extraction_service = Arc::new(ExtractionService::new(
        Arc::clone(&media_store),
        demuxer,
        visual_encoder,
        audio_encoder,
        Arc::clone(&feature_store),
    ));

    let captioning_service = Arc::new(CaptioningService::new(
        feature_store,
        caption_engine,
        caption_log,
    ));

    let state = AppState {
        media_store,
        extraction_service,
        captioning_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

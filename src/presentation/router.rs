use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioEncoder, Captioner, MediaDemuxer, VisualEncoder};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    extract_features_handler, generate_caption_handler, health_handler, save_caption_handler,
    upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<D, V, A, M>(state: AppState<D, V, A, M>) -> Router
where
    D: MediaDemuxer + 'static,
    V: VisualEncoder + 'static,
    A: AudioEncoder + 'static,
    M: Captioner + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.extraction.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/videos", post(upload_handler::<D, V, A, M>))
        .route(
            "/api/v1/features",
            post(extract_features_handler::<D, V, A, M>),
        )
        .route(
            "/api/v1/captions",
            post(generate_caption_handler::<D, V, A, M>),
        )
        .route(
            "/api/v1/captions/save",
            post(save_caption_handler::<D, V, A, M>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

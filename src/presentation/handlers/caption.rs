use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioEncoder, Captioner, MediaDemuxer, VisualEncoder};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct GenerateCaptionRequest {
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateCaptionResponse {
    pub caption: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn generate_caption_handler<D, V, A, M>(
    State(state): State<AppState<D, V, A, M>>,
    Json(request): Json<GenerateCaptionRequest>,
) -> impl IntoResponse
where
    D: MediaDemuxer + 'static,
    V: VisualEncoder + 'static,
    A: AudioEncoder + 'static,
    M: Captioner + 'static,
{
    let filename = match request.filename {
        Some(f) if !f.is_empty() => f,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing video ID".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.captioning_service.caption(&filename).await {
        Ok(generated) => (
            StatusCode::OK,
            Json(GenerateCaptionResponse {
                caption: generated.caption.into_string(),
            }),
        )
            .into_response(),
        Err(e) if e.is_not_found() => {
            tracing::warn!(error = %e, filename = %filename, "Features missing for caption request");
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Features not extracted: {}", e),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, filename = %filename, "Caption generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Inference failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

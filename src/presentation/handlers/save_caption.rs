use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioEncoder, Captioner, MediaDemuxer, VisualEncoder};
use crate::domain::CaptionRecord;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SaveCaptionRequest {
    pub filename: Option<String>,
    pub caption: Option<String>,
}

#[derive(Serialize)]
pub struct SaveCaptionResponse {
    pub message: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn save_caption_handler<D, V, A, M>(
    State(state): State<AppState<D, V, A, M>>,
    Json(request): Json<SaveCaptionRequest>,
) -> impl IntoResponse
where
    D: MediaDemuxer + 'static,
    V: VisualEncoder + 'static,
    A: AudioEncoder + 'static,
    M: Captioner + 'static,
{
    let (filename, caption) = match (request.filename, request.caption) {
        (Some(f), Some(c)) if !f.is_empty() && !c.is_empty() => (f, c),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing filename or caption".to_string(),
                }),
            )
                .into_response();
        }
    };

    let record = CaptionRecord::new(filename, caption);

    match state.captioning_service.save(&record).await {
        Ok(()) => (
            StatusCode::OK,
            Json(SaveCaptionResponse {
                message: "Caption saved successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save caption");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to save: {}", e),
                }),
            )
                .into_response()
        }
    }
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioEncoder, Captioner, MediaDemuxer, VisualEncoder};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ExtractFeaturesRequest {
    pub filename: Option<String>,
}

#[derive(Serialize)]
pub struct ExtractFeaturesResponse {
    pub message: String,
    pub video_id: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn extract_features_handler<D, V, A, M>(
    State(state): State<AppState<D, V, A, M>>,
    Json(request): Json<ExtractFeaturesRequest>,
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
                    error: "Missing filename".to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.extraction_service.extract(&filename).await {
        Ok(video_id) => (
            StatusCode::OK,
            Json(ExtractFeaturesResponse {
                message: "Feature extraction complete".to_string(),
                video_id: video_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, filename = %filename, "Feature extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Feature extraction failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

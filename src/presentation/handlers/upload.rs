use std::path::Path;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{AudioEncoder, Captioner, MediaDemuxer, VisualEncoder};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

/// Keeps the basename only; spaces become underscores and any other
/// character outside `[A-Za-z0-9._-]` is dropped.
fn sanitize_filename(raw: &str) -> String {
    let base = Path::new(raw)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(raw);

    base.chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                Some(c)
            } else if c == ' ' {
                Some('_')
            } else {
                None
            }
        })
        .collect()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<D, V, A, M>(
    State(state): State<AppState<D, V, A, M>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    D: MediaDemuxer + 'static,
    V: VisualEncoder + 'static,
    A: AudioEncoder + 'static,
    M: Captioner + 'static,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no video file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No video uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let raw_name = field.file_name().unwrap_or("unknown").to_string();
    let filename = sanitize_filename(&raw_name);
    if filename.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid filename: {}", raw_name),
            }),
        )
            .into_response();
    }

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read video bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read video: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Video upload received");

    let stream = Box::pin(futures::stream::iter(vec![Ok::<_, std::io::Error>(data)]));
    if let Err(e) = state.media_store.store(&filename, stream).await {
        tracing::error!(error = %e, "Failed to store upload");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to store upload: {}", e),
            }),
        )
            .into_response();
    }

    tracing::info!(filename = %filename, "Video upload stored");

    (
        StatusCode::OK,
        Json(UploadResponse {
            message: "Upload successful".to_string(),
            filename,
        }),
    )
        .into_response()
}

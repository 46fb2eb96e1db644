//! HTTP handlers: a thin mapping between wire requests and the store.
//!
//! No business logic lives here — each handler unpacks the request, calls
//! the matching store operation, and maps the typed error onto a status.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use commentd_core::{Comment, CommentList, WriteRequest};
use commentd_storage::StoreError;

use crate::server::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "commentd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn readyz() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn metrics() -> Response {
    match crate::metrics::render_metrics() {
        Some(body) => body.into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics not initialized").into_response(),
    }
}

/// `GET /videos/{video_id}/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<CommentList>, ApiError> {
    let list = state.store.list_by_video(&video_id).await?;
    Ok(Json(list))
}

/// `GET /comments/{id}`
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.store.get_single(&id).await?;
    Ok(Json(comment))
}

/// `POST /comments`
pub async fn create_comment(
    State(state): State<AppState>,
    Json(request): Json<WriteRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state.store.write(&request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Store error wrapper carrying the status mapping.
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::Validation { .. } => StatusCode::BAD_REQUEST,
            StoreError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind().to_string(),
        }));

        (status, body).into_response()
    }
}

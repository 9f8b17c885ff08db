use crate::auth::UserContext;
use crate::constants::MAX_PRESIGNED_EXPIRY_SECS;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::load_owned_video;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tubely_core::AppError;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PresignedQuery {
    /// Lifetime of the link in seconds (default from `PRESIGNED_URL_EXPIRY_SECS`)
    pub expires_in_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PresignedUrlResponse {
    pub url: String,
    pub expires_in_secs: u64,
}

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}/presigned",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID"),
        PresignedQuery
    ),
    responses(
        (status = 200, description = "Temporary GET link for the stored video", body = PresignedUrlResponse),
        (status = 400, description = "Invalid ID or expiry", body = ErrorResponse),
        (status = 401, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found or nothing uploaded yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_presigned_video_url(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<PresignedQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(video_id) = path?;
    let Query(query) = query?;

    let expires_in_secs = query
        .expires_in_secs
        .unwrap_or_else(|| state.config.presigned_url_expiry_secs());
    if expires_in_secs == 0 || expires_in_secs > MAX_PRESIGNED_EXPIRY_SECS {
        return Err(AppError::BadRequest(format!(
            "expires_in_secs must be between 1 and {}",
            MAX_PRESIGNED_EXPIRY_SECS
        ))
        .into());
    }

    let video = load_owned_video(state.videos.as_ref(), video_id, user.user_id).await?;
    let key = video
        .video_url
        .as_deref()
        .and_then(|url| state.video_storage.key_from_url(url))
        .ok_or_else(|| AppError::NotFound(format!("Video {} has no uploaded file", video_id)))?;

    if !state.video_storage.exists(&key).await? {
        return Err(AppError::NotFound(format!(
            "Stored object for video {} is missing",
            video_id
        ))
        .into());
    }

    let url = state
        .video_storage
        .get_presigned_url(&key, Duration::from_secs(expires_in_secs))
        .await?;

    tracing::debug!(video_id = %video_id, key = %key, expires_in_secs, "Issued presigned URL");

    Ok(Json(PresignedUrlResponse {
        url,
        expires_in_secs,
    }))
}

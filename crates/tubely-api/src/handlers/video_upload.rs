use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::VideoUploadPipeline;
use crate::state::AppState;
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tubely_core::models::Video;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Field `video`: an MP4 file"),
    responses(
        (status = 200, description = "Placeholder record created and video uploaded", body = Video),
        (status = 400, description = "Malformed multipart body, missing field or unsupported content type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Probe, storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_and_upload_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let multipart = multipart?;
    let video = VideoUploadPipeline::new(&state)
        .upload_new(user, multipart)
        .await?;
    Ok(Json(video))
}

#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Field `video`: an MP4 file"),
    responses(
        (status = 200, description = "Video uploaded", body = Video),
        (status = 400, description = "Invalid ID, missing field or unsupported content type", body = ErrorResponse),
        (status = 401, description = "Missing token or caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Probe, storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    path: Result<Path<Uuid>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(video_id) = path?;
    let multipart = multipart?;
    let video = VideoUploadPipeline::new(&state)
        .upload_existing(user, video_id, multipart)
        .await?;
    Ok(Json(video))
}

use crate::auth::UserContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::ThumbnailUploadPipeline;
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
    path = "/api/videos/{video_id}/thumbnail",
    tag = "videos",
    params(
        ("video_id" = Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Field `thumbnail`: a PNG, JPEG or GIF image"),
    responses(
        (status = 200, description = "Thumbnail stored", body = Video),
        (status = 400, description = "Invalid ID, missing field or unsupported content type", body = ErrorResponse),
        (status = 401, description = "Missing token or caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    path: Result<Path<Uuid>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(video_id) = path?;
    let multipart = multipart?;
    let video = ThumbnailUploadPipeline::new(&state)
        .upload(user, video_id, multipart)
        .await?;
    Ok(Json(video))
}

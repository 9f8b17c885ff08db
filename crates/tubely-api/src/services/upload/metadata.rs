use tubely_core::{AppError, Video, VideoUpdate};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load a record and check that `user_id` owns it.
///
/// Unknown IDs are `NotFound`; records owned by someone else are
/// `Unauthorized`.
pub async fn load_owned_video(
    repo: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = repo
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if !video.is_owned_by(user_id) {
        tracing::debug!(video_id = %video_id, user_id = %user_id, "Ownership check failed");
        return Err(AppError::Unauthorized(
            "You do not own this video".to_string(),
        ));
    }

    Ok(video)
}

/// Point the record at its committed video, leaving other columns as stored.
pub async fn attach_video_url(
    repo: &dyn VideoRepository,
    video_id: Uuid,
    url: String,
) -> Result<Video, AppError> {
    repo.update_video(video_id, VideoUpdate::VideoUrl(url)).await
}

pub async fn attach_thumbnail_url(
    repo: &dyn VideoRepository,
    video_id: Uuid,
    url: String,
) -> Result<Video, AppError> {
    repo.update_video(video_id, VideoUpdate::ThumbnailUrl(url)).await
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const PLACEHOLDER_TITLE: &str = "Get title from request";
pub const PLACEHOLDER_DESCRIPTION: &str = "Get description from request";

/// A video record owned by a single user.
///
/// `thumbnail_url` and `video_url` stay `None` until the matching upload
/// has been committed to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl Video {
    /// Build a fresh record with no uploaded assets.
    pub fn new(params: CreateVideoParams) -> Self {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: params.title,
            description: params.description,
            thumbnail_url: None,
            video_url: None,
            user_id: params.user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVideoParams {
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
}

impl CreateVideoParams {
    /// Parameters for the record created eagerly by `POST /api/videos`.
    pub fn placeholder(user_id: Uuid) -> Self {
        CreateVideoParams {
            title: PLACEHOLDER_TITLE.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            user_id,
        }
    }
}

/// A single-column change to a stored record.
///
/// Each upload writes only the URL it produced, so a thumbnail and a video
/// committed concurrently to the same record do not overwrite each other.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoUpdate {
    VideoUrl(String),
    ThumbnailUrl(String),
}

impl VideoUpdate {
    /// Column written by this update.
    pub fn column(&self) -> &'static str {
        match self {
            VideoUpdate::VideoUrl(_) => "video_url",
            VideoUpdate::ThumbnailUrl(_) => "thumbnail_url",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            VideoUpdate::VideoUrl(url) | VideoUpdate::ThumbnailUrl(url) => url,
        }
    }

    /// Apply the change to an in-memory record.
    pub fn apply(self, video: &mut Video) {
        match self {
            VideoUpdate::VideoUrl(url) => video.video_url = Some(url),
            VideoUpdate::ThumbnailUrl(url) => video.thumbnail_url = Some(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_video_has_no_urls() {
        let user_id = Uuid::new_v4();
        let video = Video::new(CreateVideoParams::placeholder(user_id));
        assert_eq!(video.title, PLACEHOLDER_TITLE);
        assert_eq!(video.description, PLACEHOLDER_DESCRIPTION);
        assert!(video.thumbnail_url.is_none());
        assert!(video.video_url.is_none());
        assert!(video.is_owned_by(user_id));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_update_touches_one_field() {
        let mut video = Video::new(CreateVideoParams::placeholder(Uuid::new_v4()));
        video.thumbnail_url = Some("http://localhost:8091/assets/t.png".to_string());

        let update = VideoUpdate::VideoUrl("http://localhost:8091/videos/other/v.mp4".into());
        assert_eq!(update.column(), "video_url");
        update.apply(&mut video);

        assert_eq!(
            video.thumbnail_url.as_deref(),
            Some("http://localhost:8091/assets/t.png")
        );
        assert_eq!(
            video.video_url.as_deref(),
            Some("http://localhost:8091/videos/other/v.mp4")
        );
    }

    #[test]
    fn test_video_serializes_snake_case() {
        let video = Video::new(CreateVideoParams::placeholder(Uuid::new_v4()));
        let json = serde_json::to_value(&video).unwrap();
        assert!(json.get("thumbnail_url").unwrap().is_null());
        assert!(json.get("video_url").unwrap().is_null());
        assert!(json.get("user_id").is_some());
    }
}

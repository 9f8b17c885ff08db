//! Repository trait for video records
//!
//! The upload pipeline only needs these four operations, so it can run
//! against PostgreSQL or an in-memory store without changes.

use async_trait::async_trait;
use tubely_core::models::{CreateVideoParams, Video, VideoUpdate};
use tubely_core::AppError;
use uuid::Uuid;

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Fetch a record by ID, regardless of owner
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Insert a new record with no uploaded assets
    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError>;

    /// Write the single column named by `update` and bump `updated_at`
    ///
    /// Other columns keep whatever is currently stored. Returns
    /// `AppError::NotFound` if the record no longer exists.
    async fn update_video(&self, id: Uuid, update: VideoUpdate) -> Result<Video, AppError>;

    /// All records owned by `user_id`, newest first
    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;
}

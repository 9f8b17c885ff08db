//! In-process video repository for tests and local tooling.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tubely_core::models::{CreateVideoParams, Video, VideoUpdate};
use tubely_core::AppError;
use uuid::Uuid;

use crate::traits::VideoRepository;

#[derive(Clone, Default)]
pub struct MemoryVideoRepository {
    videos: Arc<Mutex<HashMap<Uuid, Video>>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing `create_video`.
    pub fn insert(&self, video: Video) {
        self.lock().insert(video.id, video);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Video>> {
        // A poisoned map is still consistent: every mutation is a single insert.
        self.videos
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        let video = Video::new(params);
        self.lock().insert(video.id, video.clone());
        Ok(video)
    }

    async fn update_video(&self, id: Uuid, update: VideoUpdate) -> Result<Video, AppError> {
        let mut videos = self.lock();
        let stored = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;

        update.apply(stored);
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .lock()
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = MemoryVideoRepository::new();
        let user_id = Uuid::new_v4();
        let created = repo
            .create_video(CreateVideoParams::placeholder(user_id))
            .await
            .unwrap();

        let fetched = repo.get_video(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_persists_urls() {
        let repo = MemoryVideoRepository::new();
        let video = repo
            .create_video(CreateVideoParams::placeholder(Uuid::new_v4()))
            .await
            .unwrap();

        let url = "https://cdn.example.com/landscape/a.mp4".to_string();
        let updated = repo
            .update_video(video.id, VideoUpdate::VideoUrl(url.clone()))
            .await
            .unwrap();
        assert_eq!(updated.video_url.as_deref(), Some(url.as_str()));
        assert!(updated.updated_at >= video.updated_at);

        let fetched = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(fetched.video_url.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_updates_keep_other_url() {
        let repo = MemoryVideoRepository::new();
        let video = repo
            .create_video(CreateVideoParams::placeholder(Uuid::new_v4()))
            .await
            .unwrap();

        repo.update_video(video.id, VideoUpdate::ThumbnailUrl("t.png".into()))
            .await
            .unwrap();
        let updated = repo
            .update_video(video.id, VideoUpdate::VideoUrl("v.mp4".into()))
            .await
            .unwrap();

        assert_eq!(updated.thumbnail_url.as_deref(), Some("t.png"));
        assert_eq!(updated.video_url.as_deref(), Some("v.mp4"));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let repo = MemoryVideoRepository::new();
        let err = repo
            .update_video(Uuid::new_v4(), VideoUpdate::VideoUrl("v.mp4".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_only_returns_owner_records() {
        let repo = MemoryVideoRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.create_video(CreateVideoParams::placeholder(alice))
            .await
            .unwrap();
        repo.create_video(CreateVideoParams::placeholder(alice))
            .await
            .unwrap();
        repo.create_video(CreateVideoParams::placeholder(bob))
            .await
            .unwrap();

        assert_eq!(repo.list_videos_for_user(alice).await.unwrap().len(), 2);
        assert_eq!(repo.list_videos_for_user(bob).await.unwrap().len(), 1);
        assert_eq!(repo.len(), 3);
    }
}

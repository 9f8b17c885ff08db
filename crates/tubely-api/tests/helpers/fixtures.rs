//! Test fixtures: upload bodies and a scripted media probe.

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tubely_core::{AppError, CreateVideoParams, Video, VideoUpdate};
use tubely_db::{MemoryVideoRepository, VideoRepository};
use tubely_processing::{MediaProbe, ProbeError, ProbeOutput, ProbeStream};
use uuid::Uuid;

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Bytes standing in for an MP4; the stub probe never parses them.
pub fn create_fake_mp4() -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x00, 0x18];
    data.extend_from_slice(b"ftypmp42");
    data.extend_from_slice(&[0u8; 512]);
    data
}

pub fn file_form(field: &str, data: Vec<u8>, file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part(field.to_string(), part)
}

pub fn video_form(mime_type: &str) -> MultipartForm {
    file_form("video", create_fake_mp4(), "clip.mp4", mime_type)
}

pub fn thumbnail_form(mime_type: &str) -> MultipartForm {
    file_form("thumbnail", create_minimal_png(), "thumb.png", mime_type)
}

/// Insert a record owned by `user_id` directly into the repository.
pub fn seed_video(videos: &MemoryVideoRepository, user_id: Uuid) -> Video {
    let video = Video::new(CreateVideoParams {
        title: "Boots".to_string(),
        description: "An unboxing".to_string(),
        user_id,
    });
    videos.insert(video.clone());
    video
}

/// Media probe that returns fixed dimensions (or fails) and records the
/// paths it was asked to inspect.
#[derive(Clone, Default)]
pub struct StubProbe {
    dimensions: Option<(i64, i64)>,
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl StubProbe {
    pub fn with_dimensions(width: i64, height: i64) -> Self {
        Self {
            dimensions: Some((width, height)),
            seen: Arc::default(),
        }
    }

    /// A probe that behaves like ffprobe reporting no streams.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProbe for StubProbe {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        assert!(path.exists(), "probe called on a missing file");
        self.seen.lock().unwrap().push(path.to_path_buf());

        match self.dimensions {
            Some((width, height)) => Ok(ProbeOutput {
                streams: vec![ProbeStream {
                    width,
                    height,
                    codec_type: Some("video".to_string()),
                }],
            }),
            None => Err(ProbeError::NoStreams),
        }
    }
}

/// Probe that links a thumbnail to `video_id` while the video upload is in
/// flight, then reports the wrapped probe's result.
#[derive(Clone)]
pub struct ThumbnailDuringProbe {
    pub inner: StubProbe,
    pub videos: MemoryVideoRepository,
    pub video_id: Uuid,
    pub thumbnail_url: String,
}

#[async_trait]
impl MediaProbe for ThumbnailDuringProbe {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        self.videos
            .update_video(
                self.video_id,
                VideoUpdate::ThumbnailUrl(self.thumbnail_url.clone()),
            )
            .await
            .expect("Failed to attach thumbnail");
        self.inner.probe(path).await
    }
}

/// Repository whose reads succeed but whose updates fail like a dropped
/// database connection.
pub struct FailingUpdateRepository {
    pub inner: MemoryVideoRepository,
}

#[async_trait]
impl VideoRepository for FailingUpdateRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.inner.get_video(id).await
    }

    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        self.inner.create_video(params).await
    }

    async fn update_video(&self, _id: Uuid, _update: VideoUpdate) -> Result<Video, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        self.inner.list_videos_for_user(user_id).await
    }
}

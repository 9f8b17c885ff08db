//! End-to-end upload flows
//!
//! Both video endpoints share `VideoUploadPipeline`; they differ only in how
//! the target record is obtained. URL construction lives in the storage
//! backend, so nothing here knows whether links point at a CDN or a bucket.

use crate::auth::UserContext;
use crate::constants::{THUMBNAIL_FIELD, VIDEO_FIELD};
use crate::error::probe_error_to_app_error;
use crate::services::upload::committer::{commit_thumbnail, commit_video, CommittedObject};
use crate::services::upload::metadata::{
    attach_thumbnail_url, attach_video_url, load_owned_video,
};
use crate::services::upload::receiver::{receive_upload, UploadRules};
use crate::state::AppState;
use axum::extract::Multipart;
use std::path::PathBuf;
use tubely_core::{AppError, CreateVideoParams, Video};
use uuid::Uuid;

fn temp_dir(state: &AppState) -> Option<PathBuf> {
    state.config.upload_temp_dir().map(PathBuf::from)
}

pub struct VideoUploadPipeline<'a> {
    state: &'a AppState,
}

impl<'a> VideoUploadPipeline<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a placeholder record for the caller, then upload into it.
    ///
    /// The record is created before the body is read and is kept even when
    /// the upload fails.
    pub async fn upload_new(
        &self,
        user: UserContext,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let video = self
            .state
            .videos
            .create_video(CreateVideoParams::placeholder(user.user_id))
            .await?;
        tracing::info!(video_id = %video.id, user_id = %user.user_id, "Created placeholder video");

        self.run(video, multipart).await
    }

    /// Upload into an existing record owned by the caller.
    pub async fn upload_existing(
        &self,
        user: UserContext,
        video_id: Uuid,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let video = load_owned_video(self.state.videos.as_ref(), video_id, user.user_id).await?;
        self.run(video, multipart).await
    }

    #[tracing::instrument(skip(self, video, multipart), fields(video_id = %video.id, user_id = %video.user_id))]
    async fn run(&self, video: Video, multipart: Multipart) -> Result<Video, AppError> {
        let config = &self.state.config;
        let rules = UploadRules {
            field_name: VIDEO_FIELD,
            allowed_content_types: config.video_allowed_content_types(),
            max_size_bytes: config.max_upload_size_bytes(),
            temp_dir: temp_dir(self.state),
        };

        // Dropping `upload` removes the temp file, on every return path below.
        let upload = receive_upload(multipart, &rules).await?;

        let aspect = self
            .state
            .probe
            .aspect_ratio(upload.path())
            .await
            .map_err(probe_error_to_app_error)?;
        tracing::debug!(aspect = %aspect, "Classified video");

        let committed = commit_video(self.state.video_storage.as_ref(), &upload, aspect).await?;
        let video_id = video.id;

        attach_video_url(self.state.videos.as_ref(), video_id, committed.url.clone())
            .await
            .inspect_err(|e| log_orphan(video_id, &committed, e))
    }
}

pub struct ThumbnailUploadPipeline<'a> {
    state: &'a AppState,
}

impl<'a> ThumbnailUploadPipeline<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Store a thumbnail in the asset directory and link it to the record.
    #[tracing::instrument(skip(self, multipart), fields(user_id = %user.user_id))]
    pub async fn upload(
        &self,
        user: UserContext,
        video_id: Uuid,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let config = &self.state.config;
        load_owned_video(self.state.videos.as_ref(), video_id, user.user_id).await?;

        let rules = UploadRules {
            field_name: THUMBNAIL_FIELD,
            allowed_content_types: config.thumbnail_allowed_content_types(),
            max_size_bytes: config.max_upload_size_bytes(),
            temp_dir: temp_dir(self.state),
        };
        let upload = receive_upload(multipart, &rules).await?;

        let committed = commit_thumbnail(self.state.asset_storage.as_ref(), &upload).await?;

        attach_thumbnail_url(self.state.videos.as_ref(), video_id, committed.url.clone())
            .await
            .inspect_err(|e| log_orphan(video_id, &committed, e))
    }
}

fn log_orphan(video_id: Uuid, committed: &CommittedObject, error: &AppError) {
    tracing::warn!(
        video_id = %video_id,
        key = %committed.key,
        url = %committed.url,
        error = %error,
        "Stored object is orphaned: record update failed"
    );
}

use crate::error::storage_error_to_app_error;
use crate::services::upload::receiver::BufferedUpload;
use std::time::Instant;
use tubely_core::{AppError, AspectRatio};
use tubely_storage::keys::join_key;
use tubely_storage::Storage;

/// Where a buffered upload ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedObject {
    pub key: String,
    pub url: String,
}

/// Store a thumbnail at the root of the asset directory.
pub async fn commit_thumbnail(
    storage: &dyn Storage,
    upload: &BufferedUpload,
) -> Result<CommittedObject, AppError> {
    commit(storage, upload, upload.file_name()).await
}

/// Store a video under its aspect prefix, e.g. `landscape/<name>.mp4`.
pub async fn commit_video(
    storage: &dyn Storage,
    upload: &BufferedUpload,
    aspect: AspectRatio,
) -> Result<CommittedObject, AppError> {
    commit(storage, upload, join_key(aspect.prefix(), &upload.file_name())).await
}

async fn commit(
    storage: &dyn Storage,
    upload: &BufferedUpload,
    key: String,
) -> Result<CommittedObject, AppError> {
    let start = Instant::now();
    let reader = upload.reader().await?;

    let url = storage
        .upload_stream(
            &key,
            upload.content_type(),
            Some(upload.size_bytes()),
            Box::pin(reader),
        )
        .await
        .map_err(storage_error_to_app_error)?;

    tracing::info!(
        key = %key,
        backend = %storage.backend_type(),
        size_bytes = upload.size_bytes(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Upload committed"
    );

    Ok(CommittedObject { key, url })
}

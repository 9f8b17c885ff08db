//! Storage backends for committed uploads

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_asset_storage, create_video_storage, Storage};

/// Build the video backend and the local thumbnail asset backend.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    let video_storage = create_video_storage(config)
        .await
        .context("Failed to initialize video storage")?;
    let asset_storage = create_asset_storage(config)
        .await
        .context("Failed to initialize thumbnail asset storage")?;

    tracing::info!(
        video_backend = %video_storage.backend_type(),
        assets_root = %config.assets_root(),
        assets_base_url = %config.assets_base_url(),
        "Storage initialized"
    );

    Ok((video_storage, asset_storage))
}

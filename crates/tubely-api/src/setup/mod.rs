//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::JwtService;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::FfprobeProbe;

/// Initialize the application: database, storage, probe and routes
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        video_url_strategy = %config.video_url_strategy(),
        "Starting Tubely API"
    );

    let pool = database::setup_database(&config).await?;
    let (video_storage, asset_storage) = storage::setup_storage(&config).await?;

    let probe = FfprobeProbe::new(config.ffprobe_path()).context("Invalid FFPROBE_PATH")?;
    let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());

    let state = Arc::new(AppState {
        config: config.clone(),
        videos: Arc::new(PgVideoRepository::new(pool)),
        video_storage,
        asset_storage,
        probe: Arc::new(probe),
        jwt: Arc::new(jwt),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

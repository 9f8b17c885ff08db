use crate::auth::JwtService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::MediaProbe;
use tubely_storage::Storage;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    /// Backend for committed videos (S3 or local, per `STORAGE_BACKEND`)
    pub video_storage: Arc<dyn Storage>,
    /// Local asset directory for thumbnails
    pub asset_storage: Arc<dyn Storage>,
    pub probe: Arc<dyn MediaProbe>,
    pub jwt: Arc<JwtService>,
}

//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path the thumbnail files are served under
pub const ASSETS_PATH: &str = "/assets";

/// Multipart field carrying a video upload
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying a thumbnail upload
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Upper bound for `expires_in_secs` on presigned URLs (7 days)
pub const MAX_PRESIGNED_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

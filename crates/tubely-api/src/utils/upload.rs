//! Common utilities for file upload handlers

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tubely_core::AppError;

/// Normalize MIME type by stripping parameters (e.g. "video/mp4; codecs=avc1" -> "video/mp4")
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Validate a declared content type against an allow-list
///
/// Returns the normalized type on success.
pub fn validate_content_type(
    content_type: &str,
    allowed_types: &[String],
) -> Result<String, AppError> {
    let normalized = normalize_mime_type(content_type);
    if !allowed_types
        .iter()
        .any(|allowed| normalize_mime_type(allowed) == normalized)
    {
        return Err(AppError::InvalidInput(format!(
            "Invalid content type. Allowed types: {}",
            allowed_types.join(", ")
        )));
    }
    Ok(normalized)
}

/// File extension used when storing an accepted content type
pub fn extension_for_content_type(content_type: &str) -> String {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg".to_string(),
        "image/png" => "png".to_string(),
        "image/gif" => "gif".to_string(),
        "video/mp4" => "mp4".to_string(),
        other => other
            .rsplit('/')
            .next()
            .map(|subtype| subtype.trim_start_matches("x-"))
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("bin")
            .to_string(),
    }
}

/// 256 random bits, URL-safe base64 without padding
pub fn random_base_name() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

//! Tubely Storage Library
//!
//! Storage abstraction for committed uploads, with S3 and local filesystem
//! backends.
//!
//! # Storage key format
//!
//! - **Videos**: `{aspect_prefix}/{random_name}.mp4`, e.g. `landscape/Xk3...q.mp4`
//! - **Thumbnails**: `{random_name}.{ext}` at the root of the asset directory
//!
//! Keys must not contain `..` or a leading `/`. Public URLs are produced by an
//! [`ObjectUrlBuilder`] chosen at startup, so callers never format URLs themselves.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod url;

// Re-export commonly used types
pub use factory::{create_asset_storage, create_video_storage, url_builder_from_config};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageReader, StorageResult};
pub use tubely_core::StorageBackend;
pub use url::{BaseUrlBuilder, BucketEndpointUrlBuilder, CdnUrlBuilder, ObjectUrlBuilder};

#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::url::{BucketEndpointUrlBuilder, CdnUrlBuilder, ObjectUrlBuilder};
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::{Config, VideoUrlStrategy};

/// Select the URL strategy for S3-backed videos.
pub fn url_builder_from_config(config: &Config) -> StorageResult<Arc<dyn ObjectUrlBuilder>> {
    match config.video_url_strategy() {
        VideoUrlStrategy::Cdn => {
            let distribution = config.s3_cf_distribution().ok_or_else(|| {
                StorageError::ConfigError("S3_CF_DISTRIBUTION not configured".to_string())
            })?;
            Ok(Arc::new(CdnUrlBuilder::new(distribution)))
        }
        VideoUrlStrategy::Bucket => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);
            Ok(Arc::new(BucketEndpointUrlBuilder::new(
                bucket, region, endpoint,
            )))
        }
    }
}

/// Create the backend that committed videos are written to
pub async fn create_video_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);
            let urls = url_builder_from_config(config)?;

            let storage = S3Storage::new(bucket, region, endpoint, urls).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

/// Create the local backend for thumbnail assets
#[cfg(feature = "storage-local")]
pub async fn create_asset_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.assets_root().to_string(),
        config.assets_base_url().to_string(),
    )
    .await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
pub async fn create_asset_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "Thumbnail assets require the storage-local feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tubely_core::UploadServiceConfig;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        let inner = UploadServiceConfig::from_lookup(|k| map.get(k).map(|v| v.to_string()))
            .unwrap();
        Config(Box::new(inner))
    }

    const BASE: [(&str, &str); 2] = [
        ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ("DATABASE_URL", "postgres://localhost/tubely"),
    ];

    #[test]
    fn test_url_builder_cdn() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("S3_BUCKET", "tubely"),
            ("S3_REGION", "us-east-2"),
            ("S3_CF_DISTRIBUTION", "d1.cloudfront.net"),
        ]);
        let urls = url_builder_from_config(&config_from(&vars)).unwrap();
        assert_eq!(
            urls.object_url("other/a.mp4"),
            "https://d1.cloudfront.net/other/a.mp4"
        );
    }

    #[test]
    fn test_url_builder_bucket() {
        let mut vars = BASE.to_vec();
        vars.extend([
            ("S3_BUCKET", "tubely"),
            ("AWS_REGION", "eu-west-1"),
            ("VIDEO_URL_STRATEGY", "bucket"),
        ]);
        let urls = url_builder_from_config(&config_from(&vars)).unwrap();
        assert_eq!(
            urls.object_url("other/a.mp4"),
            "https://tubely.s3.eu-west-1.amazonaws.com/other/a.mp4"
        );
    }

    #[cfg(feature = "storage-local")]
    #[tokio::test]
    async fn test_create_local_video_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos");
        let path_str = path.to_string_lossy().to_string();
        let mut vars = BASE.to_vec();
        vars.extend([
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", path_str.as_str()),
            ("LOCAL_STORAGE_BASE_URL", "http://localhost:8091/videos"),
        ]);
        let storage = create_video_storage(&config_from(&vars)).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(path.is_dir());
    }
}

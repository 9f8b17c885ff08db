use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Selects where uploaded videos are committed. Thumbnails always go to the
/// local asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// How the public URL of a committed video object is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoUrlStrategy {
    /// `https://{distribution}/{key}`
    Cdn,
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}` or `{endpoint}/{bucket}/{key}`
    Bucket,
}

impl FromStr for VideoUrlStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cdn" | "cloudfront" => Ok(VideoUrlStrategy::Cdn),
            "bucket" | "s3" => Ok(VideoUrlStrategy::Bucket),
            _ => Err(anyhow::anyhow!("Invalid video URL strategy: {}", s)),
        }
    }
}

impl Display for VideoUrlStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            VideoUrlStrategy::Cdn => write!(f, "cdn"),
            VideoUrlStrategy::Bucket => write!(f, "bucket"),
        }
    }
}

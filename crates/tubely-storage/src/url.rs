//! Public URL construction for stored objects.

use std::fmt::Debug;

/// Maps storage keys to public URLs and back.
///
/// Every strategy is a fixed base followed by `/{key}`; only the base differs.
pub trait ObjectUrlBuilder: Debug + Send + Sync {
    /// Base URL without a trailing slash.
    fn base_url(&self) -> String;

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url(), key.trim_start_matches('/'))
    }

    /// Strip the base (and any query string) from `url`.
    fn key_from_url(&self, url: &str) -> Option<String> {
        let base = self.base_url();
        let rest = url.strip_prefix(base.as_str())?.strip_prefix('/')?;
        let key = rest.split(['?', '#']).next().unwrap_or_default();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }
}

/// `https://{distribution}/{key}`, for objects served through a CDN.
#[derive(Debug, Clone)]
pub struct CdnUrlBuilder {
    distribution: String,
}

impl CdnUrlBuilder {
    /// `distribution` is a bare host (`d111.cloudfront.net`) or a full origin.
    pub fn new(distribution: impl Into<String>) -> Self {
        Self {
            distribution: distribution.into(),
        }
    }
}

impl ObjectUrlBuilder for CdnUrlBuilder {
    fn base_url(&self) -> String {
        let dist = self.distribution.trim_end_matches('/');
        if dist.starts_with("http://") || dist.starts_with("https://") {
            dist.to_string()
        } else {
            format!("https://{}", dist)
        }
    }
}

/// Direct bucket URLs.
///
/// AWS S3 uses virtual-hosted style `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
/// S3-compatible providers with a custom endpoint use path style `{endpoint}/{bucket}/{key}`.
#[derive(Debug, Clone)]
pub struct BucketEndpointUrlBuilder {
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl BucketEndpointUrlBuilder {
    pub fn new(bucket: String, region: String, endpoint_url: Option<String>) -> Self {
        Self {
            bucket,
            region,
            endpoint_url,
        }
    }
}

impl ObjectUrlBuilder for BucketEndpointUrlBuilder {
    fn base_url(&self) -> String {
        match self.endpoint_url {
            Some(ref endpoint) => {
                format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket)
            }
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

/// Fixed base URL, used for files served by this process.
#[derive(Debug, Clone)]
pub struct BaseUrlBuilder {
    base_url: String,
}

impl BaseUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ObjectUrlBuilder for BaseUrlBuilder {
    fn base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_urls() {
        let builder = CdnUrlBuilder::new("d111111abcdef8.cloudfront.net");
        assert_eq!(
            builder.object_url("landscape/abc.mp4"),
            "https://d111111abcdef8.cloudfront.net/landscape/abc.mp4"
        );
        let builder = CdnUrlBuilder::new("https://cdn.example.com/");
        assert_eq!(
            builder.object_url("other/x.mp4"),
            "https://cdn.example.com/other/x.mp4"
        );
    }

    #[test]
    fn test_bucket_urls() {
        let aws = BucketEndpointUrlBuilder::new("tubely".into(), "us-east-2".into(), None);
        assert_eq!(
            aws.object_url("portrait/a.mp4"),
            "https://tubely.s3.us-east-2.amazonaws.com/portrait/a.mp4"
        );

        let minio = BucketEndpointUrlBuilder::new(
            "tubely".into(),
            "us-east-1".into(),
            Some("http://localhost:9000/".into()),
        );
        assert_eq!(
            minio.object_url("portrait/a.mp4"),
            "http://localhost:9000/tubely/portrait/a.mp4"
        );
    }

    #[test]
    fn test_key_from_url() {
        let builder = CdnUrlBuilder::new("cdn.example.com");
        assert_eq!(
            builder.key_from_url("https://cdn.example.com/landscape/abc.mp4?x=1"),
            Some("landscape/abc.mp4".to_string())
        );
        assert_eq!(builder.key_from_url("https://other.example.com/a.mp4"), None);
        assert_eq!(builder.key_from_url("https://cdn.example.com/"), None);

        let local = BaseUrlBuilder::new("http://localhost:8091/assets/");
        assert_eq!(
            local.key_from_url("http://localhost:8091/assets/thumb.png"),
            Some("thumb.png".to_string())
        );
    }
}

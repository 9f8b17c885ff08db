//! Multipart intake
//!
//! Streams one named multipart field into a request-scoped temp file. The
//! temp file is deleted when the returned `BufferedUpload` is dropped, so
//! every exit path of a handler cleans up after itself.

use crate::utils::upload::{extension_for_content_type, random_base_name, validate_content_type};
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tubely_core::AppError;

const TEMP_FILE_PREFIX: &str = "tubely-upload";

/// What the receiver accepts for one endpoint
#[derive(Debug, Clone)]
pub struct UploadRules<'a> {
    pub field_name: &'a str,
    pub allowed_content_types: &'a [String],
    pub max_size_bytes: usize,
    pub temp_dir: Option<PathBuf>,
}

/// An accepted upload, fully written to a temp file
#[derive(Debug)]
pub struct BufferedUpload {
    file: NamedTempFile,
    content_type: String,
    extension: String,
    base_name: String,
    size_bytes: u64,
}

impl BufferedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Normalized content type (parameters stripped)
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// `<randomBase>.<ext>`, the name the upload is committed under
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Fresh handle on the buffered bytes, positioned at the start
    pub async fn reader(&self) -> io::Result<tokio::fs::File> {
        let mut file = tokio::fs::File::from_std(self.file.reopen()?);
        file.rewind().await?;
        Ok(file)
    }
}

/// Read the multipart body until `rules.field_name` is found and buffer it.
///
/// Fields with other names are skipped. The content type is taken from the
/// part header and checked before anything touches the filesystem.
pub async fn receive_upload(
    mut multipart: Multipart,
    rules: &UploadRules<'_>,
) -> Result<BufferedUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(rules.field_name) {
            continue;
        }

        let declared = field.content_type().unwrap_or_default().to_string();
        let content_type = validate_content_type(&declared, rules.allowed_content_types)?;
        let extension = extension_for_content_type(&content_type);

        return buffer_field(field, rules, content_type, extension).await;
    }

    Err(AppError::InvalidInput(format!(
        "Missing multipart field '{}'",
        rules.field_name
    )))
}

async fn buffer_field(
    mut field: Field<'_>,
    rules: &UploadRules<'_>,
    content_type: String,
    extension: String,
) -> Result<BufferedUpload, AppError> {
    let suffix = format!(".{}", extension);
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_FILE_PREFIX).suffix(&suffix);
    let file = match &rules.temp_dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(temp_io_error)?;

    let mut writer = tokio::fs::File::from_std(file.as_file().try_clone().map_err(temp_io_error)?);
    let mut size_bytes: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        size_bytes += chunk.len() as u64;
        if size_bytes > rules.max_size_bytes as u64 {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds the {} byte limit",
                rules.max_size_bytes
            )));
        }
        writer.write_all(&chunk).await.map_err(temp_io_error)?;
    }

    if size_bytes == 0 {
        return Err(AppError::InvalidInput(format!(
            "Multipart field '{}' is empty",
            rules.field_name
        )));
    }

    writer.flush().await.map_err(temp_io_error)?;
    writer.sync_all().await.map_err(temp_io_error)?;

    tracing::debug!(
        path = %file.path().display(),
        content_type = %content_type,
        size_bytes,
        "Upload buffered to temp file"
    );

    Ok(BufferedUpload {
        file,
        content_type,
        extension,
        base_name: random_base_name(),
        size_bytes,
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

fn temp_io_error(err: io::Error) -> AppError {
    AppError::Internal(format!("Failed to buffer upload: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use tempfile::TempDir;

    const BOUNDARY: &str = "tubely-test-boundary";

    fn part(name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"upload\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, name, content_type
        )
        .into_bytes();
        out.extend_from_slice(data);
        out.extend_from_slice(b"\r\n");
        out
    }

    async fn multipart(parts: Vec<Vec<u8>>) -> Multipart {
        let mut body: Vec<u8> = parts.into_iter().flatten().collect();
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        let request = Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    fn video_types() -> Vec<String> {
        vec!["video/mp4".to_string()]
    }

    fn rules<'a>(allowed: &'a [String], dir: &TempDir) -> UploadRules<'a> {
        UploadRules {
            field_name: "video",
            allowed_content_types: allowed,
            max_size_bytes: 1024,
            temp_dir: Some(dir.path().to_path_buf()),
        }
    }

    fn dir_is_empty(dir: &TempDir) -> bool {
        std::fs::read_dir(dir.path()).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_buffers_named_field() {
        let dir = TempDir::new().unwrap();
        let allowed = video_types();
        let form = multipart(vec![
            part("title", "text/plain", b"ignored"),
            part("video", "video/mp4; codecs=avc1", b"fake mp4 bytes"),
        ])
        .await;

        let upload = receive_upload(form, &rules(&allowed, &dir)).await.unwrap();
        assert_eq!(upload.content_type(), "video/mp4");
        assert_eq!(upload.extension(), "mp4");
        assert_eq!(upload.size_bytes(), 14);
        assert!(upload.file_name().ends_with(".mp4"));
        assert!(upload.path().starts_with(dir.path()));

        let mut contents = Vec::new();
        let mut reader = upload.reader().await.unwrap();
        tokio::io::AsyncReadExt::read_to_end(&mut reader, &mut contents)
            .await
            .unwrap();
        assert_eq!(contents, b"fake mp4 bytes");

        drop(reader);
        drop(upload);
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_rejects_disallowed_type_without_writing() {
        let dir = TempDir::new().unwrap();
        let allowed = video_types();
        let form = multipart(vec![part("video", "video/quicktime", b"mov")]).await;

        let err = receive_upload(form, &rules(&allowed, &dir)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_missing_field() {
        let dir = TempDir::new().unwrap();
        let allowed = video_types();
        let form = multipart(vec![part("thumbnail", "video/mp4", b"data")]).await;

        let err = receive_upload(form, &rules(&allowed, &dir)).await.unwrap_err();
        match err {
            AppError::InvalidInput(msg) => assert!(msg.contains("'video'")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_payload_is_removed() {
        let dir = TempDir::new().unwrap();
        let allowed = video_types();
        let form = multipart(vec![part("video", "video/mp4", b"")]).await;

        let err = receive_upload(form, &rules(&allowed, &dir)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_oversized_payload_is_removed() {
        let dir = TempDir::new().unwrap();
        let allowed = video_types();
        let form = multipart(vec![part("video", "video/mp4", &[0u8; 2048])]).await;

        let err = receive_upload(form, &rules(&allowed, &dir)).await.unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert!(dir_is_empty(&dir));
    }
}

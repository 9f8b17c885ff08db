//! External media probe.
//!
//! `FfprobeProbe` runs `ffprobe -v error -print_format json -show_streams`
//! against a file on disk and decodes the stream dimensions from its JSON.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Command;
use tubely_core::AspectRatio;

use crate::aspect::classify;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid probe executable path: {0}")]
    InvalidPath(String),

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Probe exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Failed to parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Probe reported no streams")]
    NoStreams,
}

/// One stream entry from the probe output. Missing dimensions decode as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub codec_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

impl ProbeOutput {
    pub fn parse(stdout: &[u8]) -> Result<Self, ProbeError> {
        Ok(serde_json::from_slice(stdout)?)
    }

    /// Classify using the first reported stream.
    pub fn aspect_ratio(&self) -> Result<AspectRatio, ProbeError> {
        let stream = self.streams.first().ok_or(ProbeError::NoStreams)?;
        Ok(classify(stream.width, stream.height))
    }
}

/// Inspects a media file on local disk.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError>;

    async fn aspect_ratio(&self, path: &Path) -> Result<AspectRatio, ProbeError> {
        self.probe(path).await?.aspect_ratio()
    }
}

fn validate_path(path: &str) -> Result<(), ProbeError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.is_empty() || path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProbeError::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: String,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ProbeError> {
        let ffprobe_path = ffprobe_path.into();
        validate_path(&ffprobe_path)?;
        Ok(Self { ffprobe_path })
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.ffprobe_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let parsed = ProbeOutput::parse(&output.stdout)?;

        tracing::debug!(
            streams = parsed.streams.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media probe completed"
        );

        Ok(parsed)
    }
}

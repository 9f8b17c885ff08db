//! Upload pipeline: receive, classify, commit, and record.
//!
//! Each stage is a separate module so thumbnails can reuse the receiver,
//! committer and metadata steps without the probe.

pub mod committer;
pub mod metadata;
pub mod pipeline;
pub mod receiver;

pub use committer::{commit_thumbnail, commit_video, CommittedObject};
pub use metadata::{attach_thumbnail_url, attach_video_url, load_owned_video};
pub use pipeline::{ThumbnailUploadPipeline, VideoUploadPipeline};
pub use receiver::{receive_upload, BufferedUpload, UploadRules};

//! Tubely Processing Library
//!
//! Media inspection for uploaded videos: running the external probe and
//! classifying the result into an aspect ratio bucket.

pub mod aspect;
pub mod probe;

pub use aspect::classify;
pub use probe::{FfprobeProbe, MediaProbe, ProbeError, ProbeOutput, ProbeStream};
pub use tubely_core::AspectRatio;

//! Decode handle abstraction.
//!
//! The reporter and sampler never talk to FFmpeg directly. They go through
//! [`VideoOpener`], which yields an exclusively owned [`VideoSource`] bound to
//! one file. Releasing a source is dropping it, so every exit path of an
//! operation releases the handle it opened.
//!
//! [`FfmpegOpener`](crate::FfmpegOpener) is the production implementation.

use std::path::Path;

use image::DynamicImage;

use crate::{error::FramesiftError, metadata::VideoMetadata};

/// A stateful decode handle bound to one video file.
///
/// Supports property queries, repositioning, and sequential frame reads.
pub trait VideoSource {
    /// Frames per second. May be zero or negative when unknown.
    fn frames_per_second(&self) -> f64;

    /// Total frame count. May be approximate.
    fn frame_count(&self) -> f64;

    /// Frame width in pixels.
    fn width(&self) -> u32;

    /// Frame height in pixels.
    fn height(&self) -> u32;

    /// Move the read position to `frame_index` (0-based).
    fn seek(&mut self, frame_index: u64) -> Result<(), FramesiftError>;

    /// Decode the frame at the current read position and advance past it.
    fn read(&mut self) -> Result<DynamicImage, FramesiftError>;

    /// Snapshot of the four scalar properties plus derived duration.
    fn metadata(&self) -> VideoMetadata {
        VideoMetadata::new(
            self.frames_per_second(),
            self.frame_count(),
            self.width(),
            self.height(),
        )
    }
}

/// Opens decode handles.
///
/// An `Err` from [`open`](VideoOpener::open) is the "not opened" state: no
/// handle exists and there is nothing to release.
pub trait VideoOpener {
    /// The handle type produced by this opener.
    type Source: VideoSource;

    /// Open a decode handle for `path`.
    fn open(&self, path: &Path) -> Result<Self::Source, FramesiftError>;
}

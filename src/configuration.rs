//! Sampler configuration.
//!
//! [`SampleOptions`] is a builder that carries the sample count, the file
//! extension to match, the JPEG quality, where output folders go, and an
//! optional progress callback.
//!
//! # Example
//!
//! ```
//! use framesift::SampleOptions;
//!
//! let options = SampleOptions::new()
//!     .with_num_frames(50)
//!     .with_jpeg_quality(90)
//!     .with_output_root("frames");
//! assert_eq!(options.num_frames, 50);
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::FramesiftError,
    progress::{NoOpProgress, ProgressCallback},
};

/// Default number of frames sampled from each video.
pub const DEFAULT_NUM_FRAMES: usize = 200;

/// Default file extension matched by the walker and listing.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Options for [`extract_frames`](crate::extract_frames) and
/// [`extract_all`](crate::extract_all).
#[derive(Clone)]
pub struct SampleOptions {
    /// How many evenly spaced frames to take from each video.
    pub num_frames: usize,
    /// File extension (without the dot) that marks a video.
    pub extension: String,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
    /// Parent of the per-video output folders. `None` places each folder
    /// next to its video.
    pub output_root: Option<PathBuf>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for SampleOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SampleOptions")
            .field("num_frames", &self.num_frames)
            .field("extension", &self.extension)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("output_root", &self.output_root)
            .finish_non_exhaustive()
    }
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            num_frames: DEFAULT_NUM_FRAMES,
            extension: DEFAULT_EXTENSION.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            output_root: None,
            progress: Arc::new(NoOpProgress),
        }
    }
}

impl SampleOptions {
    /// Options with every default in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of frames sampled per video.
    pub fn with_num_frames(mut self, num_frames: usize) -> Self {
        self.num_frames = num_frames;
        self
    }

    /// Set the video file extension (a leading dot is ignored).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the JPEG quality.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Place output folders under `root` instead of beside each video.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Output folder for `video_path`: the configured root (or the video's
    /// own directory) joined with the video's file stem.
    pub fn output_dir_for(&self, video_path: &Path) -> PathBuf {
        let root = match &self.output_root {
            Some(root) => root.as_path(),
            None => video_path.parent().unwrap_or_else(|| Path::new("")),
        };
        let stem = video_path.file_stem().unwrap_or_default();
        root.join(stem)
    }

    pub(crate) fn validate(&self) -> Result<(), FramesiftError> {
        if self.num_frames == 0 {
            return Err(FramesiftError::InvalidSampleCount);
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(FramesiftError::InvalidJpegQuality(self.jpeg_quality));
        }
        Ok(())
    }
}

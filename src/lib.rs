//! # framesift
//!
//! Sweep folders of video files: print their basic metadata, or sample a
//! fixed number of evenly spaced frames from each one into a per-video folder
//! of numbered JPEG images. Decoding is done by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; JPEG encoding
//! by the [`image`](https://crates.io/crates/image) crate.
//!
//! ## Quick Start
//!
//! ### Report metadata for every MP4 under a directory
//!
//! ```no_run
//! use std::path::Path;
//!
//! use framesift::FfmpegOpener;
//!
//! for outcome in framesift::report_all(&FfmpegOpener, Path::new("."), "mp4") {
//!     println!("{outcome}");
//! }
//! ```
//!
//! ### Sample 200 frames from one video
//!
//! ```no_run
//! use std::path::Path;
//!
//! use framesift::{FfmpegOpener, SampleOptions, SampleOutcome};
//!
//! let options = SampleOptions::new();
//! let outcome = framesift::extract_frames(
//!     &FfmpegOpener,
//!     Path::new("set/walk.mp4"),
//!     Path::new("set/walk"),
//!     &options,
//! )?;
//! if let SampleOutcome::Saved(summary) = &outcome {
//!     println!("{} frames written", summary.saved);
//! }
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! ## Failure model
//!
//! A file that cannot be opened, a video shorter than the sample plan, and a
//! single frame that fails to decode are all absorbed into per-file outcomes
//! ([`ReportOutcome`], [`SampleOutcome`]). Filesystem faults are returned as
//! [`FramesiftError`] and stop the batch.
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod capture;
pub mod configuration;
pub mod error;
pub mod ffmpeg;
pub mod metadata;
pub mod progress;
pub mod report;
pub mod sampler;
pub mod source;
mod utilities;
pub mod walker;

pub use capture::{FfmpegOpener, VideoCapture};
pub use configuration::{DEFAULT_EXTENSION, DEFAULT_JPEG_QUALITY, DEFAULT_NUM_FRAMES, SampleOptions};
pub use error::FramesiftError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use report::{ReportOutcome, report, report_all};
pub use sampler::{
    FrameReadFailure, SampleOutcome, SamplePlan, SampleSummary, extract_all, extract_frames,
};
pub use source::{VideoOpener, VideoSource};
pub use walker::{list_videos, walk_videos};

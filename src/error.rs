//! Error types for the `framesift` crate.
//!
//! This module defines [`FramesiftError`], the unified error type returned by
//! all fallible operations in the crate. Recognised per-file failures (a
//! video that cannot be opened, a video that is too short, a frame that
//! cannot be read) are absorbed into per-file outcomes by the reporter and
//! sampler; the errors that escape those operations are filesystem and
//! configuration faults.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framesift` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramesiftError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the opener.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container holds no video stream.
    #[error("No video stream found in {path}")]
    NoVideoStream {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// Repositioning the read cursor failed.
    #[error("Failed to seek to frame {frame_index}: {reason}")]
    SeekError {
        /// Target frame index.
        frame_index: u64,
        /// Underlying reason the seek failed.
        reason: String,
    },

    /// A sample plan of zero frames was requested.
    #[error("Number of frames to sample must be greater than zero")]
    InvalidSampleCount,

    /// A JPEG quality outside `1..=100` was requested.
    #[error("JPEG quality must be between 1 and 100, got {0}")]
    InvalidJpegQuality(u8),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while listing, creating, or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for FramesiftError {
    fn from(error: FfmpegError) -> Self {
        FramesiftError::FfmpegError(error.to_string())
    }
}

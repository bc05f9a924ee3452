//! Per-frame progress reporting for the sampler.
//!
//! # Example
//!
//! ```no_run
//! use std::{path::Path, sync::Arc};
//!
//! use framesift::{FfmpegOpener, ProgressCallback, ProgressInfo, SampleOptions};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{}/{} (frame {})", info.current, info.total, info.frame_index);
//!     }
//! }
//!
//! let options = SampleOptions::new().with_progress(Arc::new(PrintProgress));
//! framesift::extract_frames(&FfmpegOpener, Path::new("in.mp4"), Path::new("in"), &options)?;
//! # Ok::<(), framesift::FramesiftError>(())
//! ```

use std::time::{Duration, Instant};

/// A snapshot of sampling progress for one video.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Plan positions attempted so far, including failed reads.
    pub current: u64,
    /// Length of the sample plan.
    pub total: u64,
    /// Frame index of the position just attempted.
    pub frame_index: u64,
    /// Frames written so far.
    pub saved: u64,
    /// Wall-clock time since the first read of this video.
    pub elapsed: Duration,
}

impl ProgressInfo {
    /// Completion percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            (self.current as f32 / self.total as f32) * 100.0
        }
    }
}

/// Receives progress updates while a video is being sampled.
///
/// Callbacks observe only; they cannot halt the operation.
pub trait ProgressCallback: Send + Sync {
    /// Called once per planned frame, after its read attempt.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Default callback that discards every notification.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Tracks counters and timing for one video and forwards snapshots.
pub(crate) struct ProgressTracker<'a> {
    callback: &'a dyn ProgressCallback,
    total: u64,
    current: u64,
    saved: u64,
    start_time: Instant,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(callback: &'a dyn ProgressCallback, total: u64) -> Self {
        Self {
            callback,
            total,
            current: 0,
            saved: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one attempted plan position.
    pub(crate) fn advance(&mut self, frame_index: u64, saved: bool) {
        self.current += 1;
        if saved {
            self.saved += 1;
        }

        self.callback.on_progress(&ProgressInfo {
            current: self.current,
            total: self.total,
            frame_index,
            saved: self.saved,
            elapsed: self.start_time.elapsed(),
        });
    }
}

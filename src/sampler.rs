//! Evenly spaced frame sampling.
//!
//! [`extract_frames`] takes a fixed number of frames spread across a video
//! and writes them as JPEG files named by their 1-based position in the
//! [`SamplePlan`] (`001.jpg`, `002.jpg`, ...). A frame that fails to read is
//! skipped without renumbering the rest, so a given plan position always maps
//! to the same file name.
//!
//! Videos that cannot be opened or are shorter than the plan are skipped
//! before any directory is created. Filesystem faults (creating the output
//! directory, writing a JPEG) are returned as errors and end the batch.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{DynamicImage, codecs::jpeg::JpegEncoder};

use crate::{
    configuration::SampleOptions,
    error::FramesiftError,
    progress::ProgressTracker,
    source::{VideoOpener, VideoSource},
    walker,
};

/// Ordered frame indices to extract from one video.
///
/// # Example
///
/// ```
/// use framesift::SamplePlan;
///
/// let plan = SamplePlan::evenly_spaced(10, 4);
/// assert_eq!(plan.indices(), &[0, 2, 5, 7]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePlan {
    indices: Vec<u64>,
}

impl SamplePlan {
    /// `floor(i * total_frames / num_frames)` for `i` in `0..num_frames`.
    ///
    /// Indices may repeat when `total_frames` is below `num_frames`; they
    /// are not deduplicated.
    pub fn evenly_spaced(total_frames: u64, num_frames: usize) -> Self {
        let count = num_frames as u128;
        let indices = (0..count)
            .map(|i| (i * u128::from(total_frames) / count) as u64)
            .collect();
        Self { indices }
    }

    /// The planned frame indices, in extraction order.
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Number of planned positions.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the plan has no positions.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `(ordinal, frame_index)` pairs with 1-based ordinals.
    pub fn ordinals(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.indices
            .iter()
            .enumerate()
            .map(|(position, &frame_index)| (position + 1, frame_index))
    }
}

/// Output file name for a 1-based plan ordinal.
///
/// ```
/// assert_eq!(framesift::sampler::frame_file_name(7), "007.jpg");
/// assert_eq!(framesift::sampler::frame_file_name(1200), "1200.jpg");
/// ```
pub fn frame_file_name(ordinal: usize) -> String {
    format!("{ordinal:03}.jpg")
}

/// A planned frame that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReadFailure {
    /// 1-based plan position (the file name it would have had).
    pub ordinal: usize,
    /// Frame index that was attempted.
    pub frame_index: u64,
    /// Why the seek or decode failed.
    pub reason: String,
}

/// What a completed sampling run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSummary {
    /// The video that was sampled.
    pub source: PathBuf,
    /// Where the JPEG files went.
    pub out_dir: PathBuf,
    /// Length of the sample plan.
    pub planned: usize,
    /// Number of JPEG files written.
    pub saved: usize,
    /// Planned frames that could not be read, in plan order.
    pub failures: Vec<FrameReadFailure>,
}

/// Result of sampling one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The plan ran; some reads may have failed.
    Saved(SampleSummary),
    /// The video could not be opened. Nothing was written.
    Unopenable {
        /// The video that was attempted.
        path: PathBuf,
        /// Why the open failed.
        reason: String,
    },
    /// The video has fewer frames than the plan asks for. Nothing was written.
    TooShort {
        /// The video that was attempted.
        path: PathBuf,
        /// Frames the video reports.
        total_frames: u64,
        /// Frames the plan asked for.
        requested: usize,
    },
}

impl SampleOutcome {
    /// The video this outcome is about.
    pub fn path(&self) -> &Path {
        match self {
            SampleOutcome::Saved(summary) => &summary.source,
            SampleOutcome::Unopenable { path, .. } | SampleOutcome::TooShort { path, .. } => path,
        }
    }

    /// Number of frames written (zero for skipped videos).
    pub fn saved(&self) -> usize {
        match self {
            SampleOutcome::Saved(summary) => summary.saved,
            _ => 0,
        }
    }
}

impl Display for SampleOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SampleOutcome::Saved(summary) => {
                for failure in &summary.failures {
                    writeln!(
                        f,
                        "Read frame {} failed: {}",
                        failure.frame_index,
                        summary.source.display()
                    )?;
                }
                write!(
                    f,
                    "{} completed {} to {}",
                    summary.source.display(),
                    summary.saved,
                    summary.out_dir.display()
                )
            }
            SampleOutcome::Unopenable { path, .. } => {
                write!(f, "Can't open video: {}", path.display())
            }
            SampleOutcome::TooShort {
                path, total_frames, ..
            } => write!(
                f,
                "Frames of video not enough: {} only {total_frames} frames",
                path.display()
            ),
        }
    }
}

/// Sample `options.num_frames` evenly spaced frames of `video_path` into
/// `out_dir`.
///
/// `out_dir` (and its parents) is created only once the video is known to be
/// long enough; existing contents are left in place. The handle is released
/// before returning on every path.
///
/// # Errors
///
/// - [`FramesiftError::InvalidSampleCount`] / [`FramesiftError::InvalidJpegQuality`]
///   for invalid options.
/// - [`FramesiftError::IoError`] or [`FramesiftError::ImageError`] if the
///   directory cannot be created or a JPEG cannot be written. Frames already
///   written stay on disk, and read failures recorded before the fault are
///   only reported through the `log` facade at debug level.
pub fn extract_frames<O: VideoOpener + ?Sized>(
    opener: &O,
    video_path: &Path,
    out_dir: &Path,
    options: &SampleOptions,
) -> Result<SampleOutcome, FramesiftError> {
    options.validate()?;

    let mut source = match opener.open(video_path) {
        Ok(source) => source,
        Err(error) => {
            log::info!("Cannot open {}: {error}", video_path.display());
            return Ok(SampleOutcome::Unopenable {
                path: video_path.to_path_buf(),
                reason: error.to_string(),
            });
        }
    };

    let total_frames = source.metadata().whole_frames();
    if total_frames < options.num_frames as u64 {
        log::info!(
            "{} has {total_frames} frames, fewer than the {} requested",
            video_path.display(),
            options.num_frames
        );
        return Ok(SampleOutcome::TooShort {
            path: video_path.to_path_buf(),
            total_frames,
            requested: options.num_frames,
        });
    }

    fs::create_dir_all(out_dir)?;

    let plan = SamplePlan::evenly_spaced(total_frames, options.num_frames);
    let mut tracker = ProgressTracker::new(options.progress.as_ref(), plan.len() as u64);
    let mut saved = 0;
    let mut failures = Vec::new();

    for (ordinal, frame_index) in plan.ordinals() {
        let image = match source.seek(frame_index).and_then(|()| source.read()) {
            Ok(image) => image,
            Err(error) => {
                log::debug!(
                    "Read frame {frame_index} failed: {}: {error}",
                    video_path.display()
                );
                failures.push(FrameReadFailure {
                    ordinal,
                    frame_index,
                    reason: error.to_string(),
                });
                tracker.advance(frame_index, false);
                continue;
            }
        };

        write_jpeg(&image, &out_dir.join(frame_file_name(ordinal)), options.jpeg_quality)?;
        saved += 1;
        tracker.advance(frame_index, true);
    }

    drop(source);

    log::info!(
        "{}: saved {saved}/{} frames to {}",
        video_path.display(),
        plan.len(),
        out_dir.display()
    );

    Ok(SampleOutcome::Saved(SampleSummary {
        source: video_path.to_path_buf(),
        out_dir: out_dir.to_path_buf(),
        planned: plan.len(),
        saved,
        failures,
    }))
}

/// Sample every matching video directly inside `source_dir` (no recursion).
///
/// Each video's output folder comes from
/// [`SampleOptions::output_dir_for`]. The returned iterator processes one
/// video per item; stop at the first `Err` to get abort-on-filesystem-fault
/// behaviour.
///
/// # Errors
///
/// Returns [`FramesiftError::IoError`] if `source_dir` cannot be listed, or
/// an options error before anything is opened.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use framesift::{FfmpegOpener, SampleOptions};
///
/// let options = SampleOptions::new();
/// for outcome in framesift::extract_all(&FfmpegOpener, Path::new("videos"), &options)? {
///     println!("{}", outcome?);
/// }
/// # Ok::<(), framesift::FramesiftError>(())
/// ```
pub fn extract_all<'a, O: VideoOpener + ?Sized>(
    opener: &'a O,
    source_dir: &Path,
    options: &'a SampleOptions,
) -> Result<
    impl Iterator<Item = Result<SampleOutcome, FramesiftError>> + use<'a, O>,
    FramesiftError,
> {
    options.validate()?;
    let videos = walker::list_videos(source_dir, &options.extension)?;

    Ok(videos.into_iter().map(move |video_path| {
        let out_dir = options.output_dir_for(&video_path);
        extract_frames(opener, &video_path, &out_dir, options)
    }))
}

fn write_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<(), FramesiftError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    image.to_rgb8().write_with_encoder(encoder)?;
    writer.flush()?;
    Ok(())
}

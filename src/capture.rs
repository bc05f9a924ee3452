//! FFmpeg-backed decode handle.
//!
//! [`VideoCapture`] owns an FFmpeg demuxer and a decoder for the best video
//! stream of one file. Seeking jumps to the nearest keyframe at or before the
//! target and [`read`](VideoSource::read) decodes forward from there, so a
//! seek followed by a read yields the first frame whose presentation index is
//! at or after the target.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Packet, Rational,
    codec::{context::Context as CodecContext, decoder::Video as VideoDecoder},
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{
    error::FramesiftError,
    source::{VideoOpener, VideoSource},
    utilities,
};

/// Opens files as [`VideoCapture`] handles.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use framesift::{FfmpegOpener, VideoOpener, VideoSource};
///
/// let capture = FfmpegOpener.open(Path::new("input.mp4"))?;
/// println!("{} frames", capture.frame_count());
/// # Ok::<(), framesift::FramesiftError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegOpener;

impl VideoOpener for FfmpegOpener {
    type Source = VideoCapture;

    fn open(&self, path: &Path) -> Result<VideoCapture, FramesiftError> {
        VideoCapture::open(path)
    }
}

/// A decode handle over the best video stream of one file.
///
/// Dropping the capture closes the demuxer and frees the decoder.
pub struct VideoCapture {
    input_context: Input,
    decoder: VideoDecoder,
    /// Built on the first decoded frame, once the real pixel format is known.
    scaler: Option<ScalingContext>,
    stream_index: usize,
    time_base: Rational,
    start_pts: i64,
    frames_per_second: f64,
    frame_count: f64,
    width: u32,
    height: u32,
    /// Next frame index `read` will return (or the first one after it).
    position: u64,
    /// The decoder has been sent EOF and fully drained.
    exhausted: bool,
    file_path: PathBuf,
}

impl Debug for VideoCapture {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoCapture")
            .field("file_path", &self.file_path)
            .field("stream_index", &self.stream_index)
            .field("frames_per_second", &self.frames_per_second)
            .field("frame_count", &self.frame_count)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl VideoCapture {
    /// Open a video file.
    ///
    /// Initialises FFmpeg (idempotent), opens the container, and builds a
    /// decoder for the best video stream.
    ///
    /// # Errors
    ///
    /// - [`FramesiftError::FileOpen`] if the file is missing, unreadable, or
    ///   its video codec cannot be decoded.
    /// - [`FramesiftError::NoVideoStream`] if the container has no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramesiftError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| FramesiftError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramesiftError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let container_seconds = if input_context.duration() > 0 {
            // Container duration is in AV_TIME_BASE (microseconds).
            input_context.duration() as f64 / 1_000_000.0
        } else {
            0.0
        };

        let (stream_index, time_base, start_pts, frames_per_second, declared_frames, decoder) = {
            let stream = input_context.streams().best(Type::Video).ok_or_else(|| {
                FramesiftError::NoVideoStream {
                    path: file_path.clone(),
                }
            })?;

            let frames_per_second = utilities::rational_to_f64(stream.avg_frame_rate())
                .or_else(|| utilities::rational_to_f64(stream.rate()))
                .unwrap_or(0.0);

            let decoder = CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(|error| FramesiftError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to create video decoder for stream {}: {error}",
                        stream.index()
                    ),
                })?;

            (
                stream.index(),
                stream.time_base(),
                stream.start_time().max(0),
                frames_per_second,
                stream.frames(),
                decoder,
            )
        };

        let frame_count = if declared_frames > 0 {
            declared_frames as f64
        } else if frames_per_second > 0.0 {
            (container_seconds * frames_per_second).trunc()
        } else {
            0.0
        };

        let width = decoder.width();
        let height = decoder.height();

        log::debug!(
            "Opened {}: stream {stream_index}, {width}x{height}, {frames_per_second:.3} fps, {frame_count} frames",
            file_path.display(),
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            stream_index,
            time_base,
            start_pts,
            frames_per_second,
            frame_count,
            width,
            height,
            position: 0,
            exhausted: false,
            file_path,
        })
    }

    /// Path this capture was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn next_video_packet(&mut self) -> Option<Packet> {
        for (stream, packet) in self.input_context.packets() {
            if stream.index() == self.stream_index {
                return Some(packet);
            }
        }
        None
    }

    fn frame_number_of(&self, frame: &VideoFrame) -> Option<u64> {
        let pts = frame.timestamp().or_else(|| frame.pts())?;
        Some(utilities::pts_to_frame_number(
            pts - self.start_pts,
            self.time_base,
            self.frames_per_second,
        ))
    }

    fn convert_frame_to_image(
        &mut self,
        frame: &VideoFrame,
    ) -> Result<DynamicImage, FramesiftError> {
        let (width, height) = (frame.width(), frame.height());

        if self.scaler.is_none() {
            self.scaler = Some(ScalingContext::get(
                frame.format(),
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?);
        }

        let mut rgb_frame = VideoFrame::empty();
        if let Some(scaler) = self.scaler.as_mut() {
            scaler.run(frame, &mut rgb_frame)?;
        }

        let buffer = utilities::frame_to_rgb_buffer(&rgb_frame, width, height);
        let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FramesiftError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;
        Ok(DynamicImage::ImageRgb8(rgb_image))
    }
}

impl VideoSource for VideoCapture {
    fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    fn frame_count(&self) -> f64 {
        self.frame_count
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn seek(&mut self, frame_index: u64) -> Result<(), FramesiftError> {
        if self.frames_per_second <= 0.0 {
            return Err(FramesiftError::SeekError {
                frame_index,
                reason: "frame rate is unknown".to_string(),
            });
        }

        let timestamp =
            utilities::frame_number_to_seek_timestamp(frame_index, self.frames_per_second);
        log::debug!(
            "Seeking {} to frame {frame_index} (t={timestamp}us)",
            self.file_path.display()
        );

        self.input_context
            .seek(timestamp, ..timestamp)
            .map_err(|error| FramesiftError::SeekError {
                frame_index,
                reason: error.to_string(),
            })?;
        self.decoder.flush();
        self.exhausted = false;
        self.position = frame_index;
        Ok(())
    }

    fn read(&mut self) -> Result<DynamicImage, FramesiftError> {
        let mut decoded_frame = VideoFrame::empty();

        loop {
            while self.decoder.receive_frame(&mut decoded_frame).is_ok() {
                // Frames without timestamps are taken at face value.
                let frame_number = self.frame_number_of(&decoded_frame).unwrap_or(self.position);
                if frame_number >= self.position {
                    self.position = frame_number + 1;
                    return self.convert_frame_to_image(&decoded_frame);
                }
            }

            if self.exhausted {
                return Err(FramesiftError::VideoDecodeError(format!(
                    "Could not locate frame {} in the video stream",
                    self.position
                )));
            }

            match self.next_video_packet() {
                Some(packet) => self.decoder.send_packet(&packet)?,
                None => {
                    self.decoder.send_eof()?;
                    self.exhausted = true;
                }
            }
        }
    }
}

impl Drop for VideoCapture {
    fn drop(&mut self) {
        log::debug!("Releasing {}", self.file_path.display());
    }
}

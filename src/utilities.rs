//! Internal utility functions.
//!
//! Pixel-buffer copying and the conversions between frame numbers,
//! presentation timestamps, and FFmpeg seek timestamps.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy pixel data from an RGB24 FFmpeg video frame into a tightly-packed
/// buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride larger than
/// `width * 3`). The padding is stripped so the result can be handed to
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_length = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == row_length {
        data[..row_length * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_length * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_length]);
        }
        buffer
    }
}

/// Convert a rational rate to a float, treating a zero denominator as unknown.
pub(crate) fn rational_to_f64(rate: Rational) -> Option<f64> {
    if rate.denominator() == 0 {
        return None;
    }
    let value = rate.numerator() as f64 / rate.denominator() as f64;
    (value > 0.0).then_some(value)
}

/// Convert a frame number to a seek timestamp in AV_TIME_BASE (microseconds).
///
/// Container-level seeking with `stream_index = -1` expects AV_TIME_BASE, so
/// the stream time base is bypassed entirely.
pub(crate) fn frame_number_to_seek_timestamp(frame_number: u64, frames_per_second: f64) -> i64 {
    let seconds = frame_number as f64 / frames_per_second;
    (seconds * 1_000_000.0) as i64
}

/// Rescale a PTS value (relative to the stream start) to a frame number.
///
/// Rounds to the nearest frame so that timestamps a hair below an exact frame
/// boundary do not land on the previous frame.
pub(crate) fn pts_to_frame_number(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64;
    let frame = (seconds * frames_per_second).round();
    if frame > 0.0 { frame as u64 } else { 0 }
}

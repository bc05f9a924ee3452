//! Video metadata snapshot.
//!
//! [`VideoMetadata`] is the read-only view the reporter prints for each
//! file. It is built from the four scalar properties a
//! [`VideoSource`](crate::VideoSource) exposes; the duration is derived once
//! at construction.

/// Metadata for a single video stream.
///
/// # Example
///
/// ```
/// use framesift::VideoMetadata;
///
/// let metadata = VideoMetadata::new(25.0, 250.0, 1920, 1080);
/// assert_eq!(metadata.duration_seconds, 10.0);
///
/// // Unreadable frame rates never divide.
/// let broken = VideoMetadata::new(0.0, 250.0, 1920, 1080);
/// assert_eq!(broken.duration_seconds, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Frames per second as reported by the decoder. May be zero or
    /// negative for streams whose rate cannot be read.
    pub frames_per_second: f64,
    /// Total frame count as reported by the decoder. May be an estimate
    /// for containers that do not declare it.
    pub frame_count: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `frame_count / frames_per_second`, or `0.0` when the rate is not
    /// positive.
    pub duration_seconds: f64,
}

impl VideoMetadata {
    /// Build a snapshot and derive its duration.
    pub fn new(frames_per_second: f64, frame_count: f64, width: u32, height: u32) -> Self {
        let duration_seconds = if frames_per_second > 0.0 {
            frame_count / frames_per_second
        } else {
            0.0
        };

        Self {
            frames_per_second,
            frame_count,
            width,
            height,
            duration_seconds,
        }
    }

    /// Frame count truncated toward zero, as used for sample planning.
    ///
    /// Negative and non-finite counts collapse to zero.
    pub fn whole_frames(&self) -> u64 {
        if self.frame_count.is_finite() && self.frame_count > 0.0 {
            self.frame_count as u64
        } else {
            0
        }
    }

    /// Resolution formatted as `WIDTHxHEIGHT`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::VideoMetadata;

    #[test]
    fn duration_is_count_over_rate() {
        let metadata = VideoMetadata::new(29.97, 2997.0, 640, 480);
        assert!((metadata.duration_seconds - 100.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_rate_yields_zero_duration() {
        assert_eq!(VideoMetadata::new(0.0, 120.0, 1, 1).duration_seconds, 0.0);
        assert_eq!(VideoMetadata::new(-1.0, 120.0, 1, 1).duration_seconds, 0.0);
    }

    #[test]
    fn whole_frames_truncates() {
        assert_eq!(VideoMetadata::new(30.0, 199.9, 1, 1).whole_frames(), 199);
        assert_eq!(VideoMetadata::new(30.0, -3.0, 1, 1).whole_frames(), 0);
        assert_eq!(VideoMetadata::new(30.0, f64::NAN, 1, 1).whole_frames(), 0);
    }

    #[test]
    fn resolution_format() {
        assert_eq!(VideoMetadata::new(30.0, 1.0, 1280, 720).resolution(), "1280x720");
    }
}

//! Metadata reporting.
//!
//! [`report`] opens one file, snapshots its [`VideoMetadata`], and releases
//! the handle. A file that cannot be opened becomes
//! [`ReportOutcome::Unopenable`] rather than an error, so [`report_all`] keeps
//! going past it.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use crate::{
    metadata::VideoMetadata,
    source::{VideoOpener, VideoSource},
    walker,
};

/// Result of reporting on one file.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The file opened and its properties were read.
    Reported {
        /// The file that was inspected.
        path: PathBuf,
        /// Its metadata snapshot.
        metadata: VideoMetadata,
    },
    /// The file could not be opened.
    Unopenable {
        /// The file that was attempted.
        path: PathBuf,
        /// Why the open failed.
        reason: String,
    },
}

impl ReportOutcome {
    /// The file this outcome is about.
    pub fn path(&self) -> &Path {
        match self {
            ReportOutcome::Reported { path, .. } | ReportOutcome::Unopenable { path, .. } => path,
        }
    }

    /// The metadata, if the file could be opened.
    pub fn metadata(&self) -> Option<&VideoMetadata> {
        match self {
            ReportOutcome::Reported { metadata, .. } => Some(metadata),
            ReportOutcome::Unopenable { .. } => None,
        }
    }
}

/// Renders the fixed multi-line report, or a single "cannot open" line.
///
/// ```text
/// File: ./set/walk.mp4
///   fps: 29.97 FPS
///   duration: 12.01 s
///   resolution: 1920x1080
/// ```
impl Display for ReportOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ReportOutcome::Reported { path, metadata } => {
                writeln!(f, "File: {}", path.display())?;
                writeln!(f, "  fps: {:.2} FPS", metadata.frames_per_second)?;
                writeln!(f, "  duration: {:.2} s", metadata.duration_seconds)?;
                write!(f, "  resolution: {}", metadata.resolution())
            }
            ReportOutcome::Unopenable { path, .. } => {
                write!(f, "Can't open file: {}", path.display())
            }
        }
    }
}

/// Report on a single file.
///
/// The handle is released before returning. Open failures are absorbed and
/// logged.
pub fn report<O: VideoOpener + ?Sized>(opener: &O, path: &Path) -> ReportOutcome {
    match opener.open(path) {
        Ok(source) => {
            let metadata = source.metadata();
            drop(source);
            ReportOutcome::Reported {
                path: path.to_path_buf(),
                metadata,
            }
        }
        Err(error) => {
            log::info!("Cannot open {}: {error}", path.display());
            ReportOutcome::Unopenable {
                path: path.to_path_buf(),
                reason: error.to_string(),
            }
        }
    }
}

/// Lazily report on every file under `root` whose name ends in
/// `.<extension>`, recursing into subdirectories.
///
/// Individual failures never stop the walk.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use framesift::FfmpegOpener;
///
/// for outcome in framesift::report_all(&FfmpegOpener, Path::new("."), "mp4") {
///     println!("{outcome}");
/// }
/// ```
pub fn report_all<'a, O: VideoOpener + ?Sized>(
    opener: &'a O,
    root: &Path,
    extension: &str,
) -> impl Iterator<Item = ReportOutcome> + use<'a, O> {
    walker::walk_videos(root, extension).map(move |path| report(opener, &path))
}

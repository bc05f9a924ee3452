//! Locating video files on disk.
//!
//! [`walk_videos`] descends a directory tree lazily (the reporter's input);
//! [`list_videos`] looks at a single directory level (the sampler's input).
//! Both keep regular files whose name ends, case-insensitively, in
//! `.<extension>`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::error::FramesiftError;

/// Whether `path`'s file name ends in `.<extension>`, ignoring ASCII case.
///
/// ```
/// use std::path::Path;
///
/// use framesift::walker::has_extension;
///
/// assert!(has_extension(Path::new("clip.MP4"), "mp4"));
/// assert!(!has_extension(Path::new("clip.mp4.txt"), "mp4"));
/// ```
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.trim_start_matches('.').to_ascii_lowercase());
    path.file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(&suffix))
        .unwrap_or(false)
}

/// Recursively yield every matching file under `root`.
///
/// Order is the filesystem's traversal order. Directory symlinks are not
/// descended; symlinks to files are yielded. Unreadable entries are logged
/// and skipped.
pub fn walk_videos(root: &Path, extension: &str) -> impl Iterator<Item = PathBuf> + use<> {
    let extension = extension.to_string();

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                log::warn!("Skipping unreadable entry: {error}");
                None
            }
        })
        .filter(move |entry| entry.path().is_file() && has_extension(entry.path(), &extension))
        .map(|entry| entry.into_path())
}

/// List matching files directly inside `directory` (no recursion).
///
/// # Errors
///
/// Returns [`FramesiftError::IoError`] if `directory` cannot be read.
pub fn list_videos(directory: &Path, extension: &str) -> Result<Vec<PathBuf>, FramesiftError> {
    let mut videos = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            videos.push(path);
        }
    }

    log::debug!("Found {} video(s) in {}", videos.len(), directory.display());
    Ok(videos)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::has_extension;

    #[test]
    fn extension_match_ignores_case() {
        assert!(has_extension(Path::new("a.mp4"), "mp4"));
        assert!(has_extension(Path::new("dir/A.Mp4"), "mp4"));
        assert!(has_extension(Path::new("b.MP4"), ".MP4"));
    }

    #[test]
    fn extension_match_rejects_others() {
        assert!(!has_extension(Path::new("a.mkv"), "mp4"));
        assert!(!has_extension(Path::new("amp4"), "mp4"));
        assert!(!has_extension(Path::new("a.mp4.part"), "mp4"));
        assert!(!has_extension(Path::new("/"), "mp4"));
    }
}

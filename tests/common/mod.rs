//! In-memory decode handles for exercising the reporter and sampler without
//! FFmpeg.

#![allow(dead_code)]

use std::{
    cell::{Ref, RefCell},
    collections::HashMap,
    path::{Path, PathBuf},
    rc::Rc,
};

use framesift::{FramesiftError, VideoOpener, VideoSource};
use image::{DynamicImage, Rgb, RgbImage};

/// Properties of a synthetic video.
#[derive(Debug, Clone)]
pub struct FakeVideo {
    pub frames_per_second: f64,
    pub frame_count: f64,
    pub width: u32,
    pub height: u32,
    /// Frame indices whose decode fails.
    pub failing_frames: Vec<u64>,
}

impl FakeVideo {
    pub fn new(frames_per_second: f64, frame_count: f64) -> Self {
        Self {
            frames_per_second,
            frame_count,
            width: 16,
            height: 8,
            failing_frames: Vec::new(),
        }
    }

    pub fn failing_at(mut self, frame_index: u64) -> Self {
        self.failing_frames.push(frame_index);
        self
    }
}

/// Everything the fake handles were asked to do.
#[derive(Debug, Default)]
pub struct Journal {
    pub opened: Vec<PathBuf>,
    pub released: Vec<PathBuf>,
    pub seeks: Vec<u64>,
    pub reads: usize,
}

/// Opens [`FakeSource`]s by file name; unknown names fail to open.
#[derive(Default)]
pub struct FakeOpener {
    videos: HashMap<String, FakeVideo>,
    journal: Rc<RefCell<Journal>>,
}

impl FakeOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, file_name: &str, video: FakeVideo) -> Self {
        self.videos.insert(file_name.to_string(), video);
        self
    }

    pub fn journal(&self) -> Ref<'_, Journal> {
        self.journal.borrow()
    }
}

impl VideoOpener for FakeOpener {
    type Source = FakeSource;

    fn open(&self, path: &Path) -> Result<FakeSource, FramesiftError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let video = self
            .videos
            .get(&name)
            .cloned()
            .ok_or_else(|| FramesiftError::FileOpen {
                path: path.to_path_buf(),
                reason: "Invalid data found when processing input".to_string(),
            })?;

        self.journal.borrow_mut().opened.push(path.to_path_buf());
        Ok(FakeSource {
            path: path.to_path_buf(),
            video,
            position: 0,
            journal: Rc::clone(&self.journal),
        })
    }
}

pub struct FakeSource {
    path: PathBuf,
    video: FakeVideo,
    position: u64,
    journal: Rc<RefCell<Journal>>,
}

impl VideoSource for FakeSource {
    fn frames_per_second(&self) -> f64 {
        self.video.frames_per_second
    }

    fn frame_count(&self) -> f64 {
        self.video.frame_count
    }

    fn width(&self) -> u32 {
        self.video.width
    }

    fn height(&self) -> u32 {
        self.video.height
    }

    fn seek(&mut self, frame_index: u64) -> Result<(), FramesiftError> {
        self.journal.borrow_mut().seeks.push(frame_index);
        self.position = frame_index;
        Ok(())
    }

    fn read(&mut self) -> Result<DynamicImage, FramesiftError> {
        self.journal.borrow_mut().reads += 1;
        let frame_index = self.position;
        if frame_index as f64 >= self.video.frame_count
            || self.video.failing_frames.contains(&frame_index)
        {
            return Err(FramesiftError::VideoDecodeError(format!(
                "Could not locate frame {frame_index} in the video stream"
            )));
        }

        self.position += 1;
        let shade = (frame_index % 256) as u8;
        Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            self.video.width,
            self.video.height,
            Rgb([shade, shade, shade]),
        )))
    }
}

impl Drop for FakeSource {
    fn drop(&mut self) {
        self.journal.borrow_mut().released.push(self.path.clone());
    }
}

/// Create an empty file (contents are irrelevant to the fake opener).
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, b"").expect("write file");
}

/// Sorted file names inside `directory`.
pub fn file_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

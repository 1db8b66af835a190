use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::domain::capture_options::CaptureOptions;
use crate::capture::domain::frame_source::{FrameSource, StreamInfo};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;

/// Replays still image files as a camera stream.
///
/// The path may be a single image or a directory; directory entries are
/// played in file-name order and the stream loops at the end. Frames keep
/// each file's native resolution, so the requested size is advisory only.
/// Facing mode is ignored.
pub struct ImageDirectorySource {
    path: PathBuf,
    files: Vec<PathBuf>,
    cursor: usize,
    frames_read: usize,
}

impl ImageDirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            files: Vec::new(),
            cursor: 0,
            frames_read: 0,
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(path: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if path.is_file() {
        return if is_image(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            Err(format!("Not an image file: {}", path.display()).into())
        };
    }
    if !path.is_dir() {
        return Err(format!("Camera source not found: {}", path.display()).into());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(format!("No images found in {}", path.display()).into());
    }
    Ok(files)
}

fn decode(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3, index))
}

impl FrameSource for ImageDirectorySource {
    fn open(&mut self, options: &CaptureOptions) -> Result<StreamInfo, Box<dyn std::error::Error>> {
        let files = list_images(&self.path)?;
        let (width, height) = image::image_dimensions(&files[0])?;
        log::debug!(
            "Opened {} image(s) from {} (requested {}x{})",
            files.len(),
            self.path.display(),
            options.width,
            options.height
        );
        self.files = files;
        self.cursor = 0;
        Ok(StreamInfo { width, height })
    }

    fn read_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
        if self.files.is_empty() {
            return Err("ImageDirectorySource: not opened".into());
        }
        let path = &self.files[self.cursor];
        let frame = decode(path, self.frames_read)?;
        self.cursor = (self.cursor + 1) % self.files.len();
        self.frames_read += 1;
        Ok(frame)
    }

    fn close(&mut self) {
        self.files.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([value, value, value]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_single_file_reports_native_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "face.png", 100, 80, 10);
        let mut source = ImageDirectorySource::new(&path);
        let stream = source.open(&CaptureOptions::default()).unwrap();
        assert_eq!(
            stream,
            StreamInfo {
                width: 100,
                height: 80
            }
        );
    }

    #[test]
    fn test_open_missing_path_fails() {
        let mut source = ImageDirectorySource::new("/nonexistent/camera");
        assert!(source.open(&CaptureOptions::default()).is_err());
    }

    #[test]
    fn test_open_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not an image").unwrap();
        let mut source = ImageDirectorySource::new(dir.path());
        let err = source.open(&CaptureOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No images found"));
    }

    #[test]
    fn test_frames_cycle_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "b.png", 4, 4, 200);
        write_test_image(dir.path(), "a.png", 4, 4, 20);
        let mut source = ImageDirectorySource::new(dir.path());
        source.open(&CaptureOptions::default()).unwrap();

        let first = source.read_frame().unwrap();
        let second = source.read_frame().unwrap();
        let third = source.read_frame().unwrap();
        assert_eq!(first.data()[0], 20);
        assert_eq!(second.data()[0], 200);
        assert_eq!(third.data()[0], 20);
        assert_eq!(third.index(), 2);
    }

    #[test]
    fn test_read_without_open_returns_error() {
        let mut source = ImageDirectorySource::new("/tmp");
        assert!(source.read_frame().is_err());
    }

    #[test]
    fn test_close_idempotent_and_stops_reads() {
        let dir = tempfile::tempdir().unwrap();
        write_test_image(dir.path(), "a.png", 4, 4, 20);
        let mut source = ImageDirectorySource::new(dir.path());
        source.open(&CaptureOptions::default()).unwrap();
        source.close();
        source.close();
        assert!(source.read_frame().is_err());
    }
}

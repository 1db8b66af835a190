use thiserror::Error;

use crate::capture::domain::capture_options::CaptureOptions;
use crate::capture::domain::frame_source::{FrameSource, StreamInfo};
use crate::capture::domain::preview_surface::{NullPreviewSurface, PreviewSurface};
use crate::capture::domain::still_encoder::StillEncoder;
use crate::capture::domain::still_image::StillImage;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("failed to read frame: {0}")]
    Read(#[source] Box<dyn std::error::Error>),
    #[error("failed to encode still: {0}")]
    Encode(#[source] Box<dyn std::error::Error>),
}

/// Owns a frame source and the preview surface its stream is shown on.
///
/// Two states only: stopped (no stream held) and running. Captures are
/// refused while stopped.
pub struct Camera {
    source: Box<dyn FrameSource>,
    encoder: Box<dyn StillEncoder>,
    preview: Box<dyn PreviewSurface>,
    options: CaptureOptions,
    stream: Option<StreamInfo>,
}

impl Camera {
    pub fn new(
        source: Box<dyn FrameSource>,
        encoder: Box<dyn StillEncoder>,
        options: CaptureOptions,
    ) -> Self {
        Self {
            source,
            encoder,
            preview: Box::new(NullPreviewSurface),
            options,
            stream: None,
        }
    }

    pub fn with_preview(mut self, preview: Box<dyn PreviewSurface>) -> Self {
        self.preview = preview;
        self
    }

    /// Negotiated stream resolution, if running.
    pub fn stream(&self) -> Option<StreamInfo> {
        self.stream
    }

    /// Acquires the stream and binds it to the preview surface.
    ///
    /// Returns `false` when the device is missing or access is denied.
    /// Never fails otherwise. A running camera is restarted.
    pub fn start(&mut self) -> bool {
        self.stop();
        match self.source.open(&self.options) {
            Ok(stream) => {
                log::info!(
                    "Camera started at {}x{} (requested {}x{}, facing {})",
                    stream.width,
                    stream.height,
                    self.options.width,
                    self.options.height,
                    self.options.facing_mode
                );
                self.preview.attach(&stream);
                self.stream = Some(stream);
                true
            }
            Err(e) => {
                log::error!("Error starting camera: {e}");
                false
            }
        }
    }

    /// Releases the stream and clears the preview. No-op when stopped.
    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            self.source.close();
            self.preview.clear();
            log::info!("Camera stopped");
        }
    }

    /// Snapshots the current frame, or `None` when no stream is active.
    pub fn capture_image(&mut self) -> Result<Option<StillImage>, CaptureError> {
        if self.stream.is_none() {
            return Ok(None);
        }
        let frame = self.source.read_frame().map_err(CaptureError::Read)?;
        let still = self.encoder.encode(&frame).map_err(CaptureError::Encode)?;
        log::debug!(
            "Captured frame {} as {} byte still",
            frame.index(),
            still.jpeg().len()
        );
        Ok(Some(still))
    }

    pub fn is_running(&self) -> bool {
        self.stream.is_some()
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    #[derive(Default)]
    struct SourceLog {
        opens: usize,
        closes: usize,
        reads: usize,
    }

    struct StubSource {
        log: Arc<Mutex<SourceLog>>,
        deny: bool,
        fail_reads: bool,
    }

    impl StubSource {
        fn new() -> (Self, Arc<Mutex<SourceLog>>) {
            let log = Arc::new(Mutex::new(SourceLog::default()));
            (
                Self {
                    log: log.clone(),
                    deny: false,
                    fail_reads: false,
                },
                log,
            )
        }

        fn denied() -> Self {
            let (mut source, _) = Self::new();
            source.deny = true;
            source
        }
    }

    impl FrameSource for StubSource {
        fn open(
            &mut self,
            options: &CaptureOptions,
        ) -> Result<StreamInfo, Box<dyn std::error::Error>> {
            if self.deny {
                return Err("permission denied".into());
            }
            self.log.lock().unwrap().opens += 1;
            Ok(StreamInfo {
                width: options.width / 2,
                height: options.height / 2,
            })
        }

        fn read_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>> {
            if self.fail_reads {
                return Err("device unplugged".into());
            }
            let mut log = self.log.lock().unwrap();
            log.reads += 1;
            Ok(Frame::new(vec![128; 4 * 4 * 3], 4, 4, 3, log.reads))
        }

        fn close(&mut self) {
            self.log.lock().unwrap().closes += 1;
        }
    }

    struct StubPreview {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl PreviewSurface for StubPreview {
        fn attach(&mut self, stream: &StreamInfo) {
            self.events
                .lock()
                .unwrap()
                .push(format!("attach {}x{}", stream.width, stream.height));
        }

        fn clear(&mut self) {
            self.events.lock().unwrap().push("clear".to_string());
        }
    }

    /// Emits a JPEG-shaped marker sized like the frame.
    struct StubEncoder;

    impl StillEncoder for StubEncoder {
        fn encode(&self, frame: &Frame) -> Result<StillImage, Box<dyn std::error::Error>> {
            Ok(StillImage::new(
                vec![0xFF, 0xD8, 0xFF, 0xD9],
                frame.width(),
                frame.height(),
            ))
        }
    }

    fn stub_camera(source: StubSource) -> Camera {
        Camera::new(
            Box::new(source),
            Box::new(StubEncoder),
            CaptureOptions::default(),
        )
    }

    struct FailingEncoder;

    impl StillEncoder for FailingEncoder {
        fn encode(&self, _frame: &Frame) -> Result<StillImage, Box<dyn std::error::Error>> {
            Err("unsupported layout".into())
        }
    }

    // --- Tests ---

    #[test]
    fn test_capture_without_stream_returns_none() {
        let (source, log) = StubSource::new();
        let mut camera = stub_camera(source);
        assert!(camera.capture_image().unwrap().is_none());
        assert_eq!(log.lock().unwrap().reads, 0);
    }

    #[test]
    fn test_start_success_sets_running() {
        let (source, _) = StubSource::new();
        let mut camera = stub_camera(source);
        assert!(camera.start());
        assert!(camera.is_running());
        assert_eq!(
            camera.stream(),
            Some(StreamInfo {
                width: 320,
                height: 240
            })
        );
    }

    #[test]
    fn test_start_denied_returns_false_and_stays_stopped() {
        let mut camera = stub_camera(StubSource::denied());
        assert!(!camera.start());
        assert!(!camera.is_running());
        assert!(camera.capture_image().unwrap().is_none());
    }

    #[test]
    fn test_stop_returns_to_stopped() {
        let (source, log) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.start();
        camera.stop();
        assert!(!camera.is_running());
        assert_eq!(log.lock().unwrap().closes, 1);
    }

    #[test]
    fn test_stop_idempotent() {
        let (source, log) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.start();
        camera.stop();
        camera.stop();
        assert!(!camera.is_running());
        assert_eq!(log.lock().unwrap().closes, 1);
    }

    #[test]
    fn test_stop_before_start_is_noop() {
        let (source, log) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.stop();
        assert_eq!(log.lock().unwrap().closes, 0);
    }

    #[test]
    fn test_restart_releases_previous_stream() {
        let (source, log) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.start();
        camera.start();
        let log = log.lock().unwrap();
        assert_eq!(log.opens, 2);
        assert_eq!(log.closes, 1);
    }

    #[test]
    fn test_preview_attached_and_cleared() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let (source, _) = StubSource::new();
        let mut camera = stub_camera(source).with_preview(Box::new(StubPreview {
            events: events.clone(),
        }));
        camera.start();
        camera.stop();
        assert_eq!(*events.lock().unwrap(), vec!["attach 320x240", "clear"]);
    }

    #[test]
    fn test_capture_while_running_encodes_frame() {
        let (source, _) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.start();
        let still = camera.capture_image().unwrap().unwrap();
        assert_eq!(still.width(), 4);
        assert_eq!(still.height(), 4);
        assert_eq!(&still.jpeg()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_capture_after_stop_returns_none() {
        let (source, _) = StubSource::new();
        let mut camera = stub_camera(source);
        camera.start();
        camera.stop();
        assert!(camera.capture_image().unwrap().is_none());
    }

    #[test]
    fn test_read_failure_is_capture_error() {
        let (mut source, _) = StubSource::new();
        source.fail_reads = true;
        let mut camera = stub_camera(source);
        camera.start();
        let err = camera.capture_image().unwrap_err();
        assert!(matches!(err, CaptureError::Read(_)));
        assert!(err.to_string().contains("device unplugged"));
    }

    #[test]
    fn test_encode_failure_is_capture_error() {
        let (source, _) = StubSource::new();
        let mut camera = Camera::new(
            Box::new(source),
            Box::new(FailingEncoder),
            CaptureOptions::default(),
        );
        camera.start();
        let err = camera.capture_image().unwrap_err();
        assert!(matches!(err, CaptureError::Encode(_)));
    }

    #[test]
    fn test_drop_releases_stream() {
        let (source, log) = StubSource::new();
        {
            let mut camera = stub_camera(source);
            camera.start();
        }
        assert_eq!(log.lock().unwrap().closes, 1);
    }
}

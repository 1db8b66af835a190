use crate::capture::domain::capture_options::CaptureOptions;
use crate::shared::frame::Frame;

/// Resolution a source actually negotiated when opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
}

/// A live camera-like stream of frames.
///
/// Implementations own the device handle. `open` may fail when the device
/// is missing or access is denied; `close` releases everything `open`
/// acquired and must be safe to call on a closed source.
pub trait FrameSource: Send {
    fn open(&mut self, options: &CaptureOptions) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// Returns the frame currently visible on the stream.
    fn read_frame(&mut self) -> Result<Frame, Box<dyn std::error::Error>>;

    fn close(&mut self);
}

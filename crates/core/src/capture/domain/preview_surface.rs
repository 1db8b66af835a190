use crate::capture::domain::frame_source::StreamInfo;

/// Display surface a live stream is bound to while the camera runs.
pub trait PreviewSurface: Send {
    fn attach(&mut self, stream: &StreamInfo);

    fn clear(&mut self);
}

/// Surface for headless use. Discards everything.
pub struct NullPreviewSurface;

impl PreviewSurface for NullPreviewSurface {
    fn attach(&mut self, _stream: &StreamInfo) {}
    fn clear(&mut self) {}
}

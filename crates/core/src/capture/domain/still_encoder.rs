use crate::capture::domain::still_image::StillImage;
use crate::shared::frame::Frame;

/// Encodes a raw frame into a transmittable still.
pub trait StillEncoder: Send {
    fn encode(&self, frame: &Frame) -> Result<StillImage, Box<dyn std::error::Error>>;
}

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

/// A JPEG-encoded capture, ready to send to the recognition service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StillImage {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

impl StillImage {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            jpeg,
            width,
            height,
        }
    }

    pub fn jpeg(&self) -> &[u8] {
        &self.jpeg
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `data:image/jpeg;base64,...`, the form the server splits on `,`.
    pub fn to_data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64_STANDARD.encode(&self.jpeg))
    }
}

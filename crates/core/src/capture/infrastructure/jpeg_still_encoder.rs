use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::capture::domain::still_encoder::StillEncoder;
use crate::capture::domain::still_image::StillImage;
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::frame::Frame;

/// Encodes RGB or grayscale frames to baseline JPEG using the `image` crate.
pub struct JpegStillEncoder {
    quality: u8,
}

impl JpegStillEncoder {
    pub fn new() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }

    /// Quality is clamped to 1..=100.
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegStillEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StillEncoder for JpegStillEncoder {
    fn encode(&self, frame: &Frame) -> Result<StillImage, Box<dyn std::error::Error>> {
        let color_type = match frame.channels() {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            n => return Err(format!("cannot encode frame with {n} channels as JPEG").into()),
        };

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality).encode(
            frame.data(),
            frame.width(),
            frame.height(),
            color_type,
        )?;
        Ok(StillImage::new(jpeg, frame.width(), frame.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_encode_produces_jpeg_markers() {
        let still = JpegStillEncoder::new()
            .encode(&make_frame(16, 8, [50, 100, 200]))
            .unwrap();
        let jpeg = still.jpeg();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_decoded_still_preserves_dimensions() {
        let still = JpegStillEncoder::new()
            .encode(&make_frame(40, 30, [200, 200, 200]))
            .unwrap();
        let img = image::load_from_memory(still.jpeg()).unwrap();
        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 30);
        assert_eq!((still.width(), still.height()), (40, 30));
    }

    #[test]
    fn test_decoded_pixels_close_to_source() {
        let still = JpegStillEncoder::new()
            .encode(&make_frame(16, 16, [50, 100, 200]))
            .unwrap();
        let img = image::load_from_memory(still.jpeg()).unwrap().to_rgb8();
        let pixel = img.get_pixel(8, 8).0;
        for (got, want) in pixel.iter().zip([50u8, 100, 200]) {
            assert!(got.abs_diff(want) <= 8, "{pixel:?}");
        }
    }

    #[test]
    fn test_grayscale_frame_encodes() {
        let frame = Frame::new(vec![90; 8 * 8], 8, 8, 1, 0);
        assert!(JpegStillEncoder::new().encode(&frame).is_ok());
    }

    #[test]
    fn test_rgba_frame_rejected() {
        let frame = Frame::new(vec![0; 2 * 2 * 4], 2, 2, 4, 0);
        let err = JpegStillEncoder::new().encode(&frame).unwrap_err();
        assert!(err.to_string().contains("4 channels"));
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(JpegStillEncoder::with_quality(0).quality(), 1);
        assert_eq!(JpegStillEncoder::with_quality(200).quality(), 100);
        assert_eq!(JpegStillEncoder::new().quality(), 92);
    }
}

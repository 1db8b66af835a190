pub mod image_directory_source;
pub mod jpeg_still_encoder;

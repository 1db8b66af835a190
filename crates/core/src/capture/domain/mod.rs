pub mod camera;
pub mod capture_options;
pub mod frame_source;
pub mod preview_surface;
pub mod still_encoder;
pub mod still_image;

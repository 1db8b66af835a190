pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

pub const RECOGNIZE_PATH: &str = "/recognize";
pub const ENROLL_PATH: &str = "/save_face";

/// Multipart field carrying the still as a data URL.
pub const IMAGE_FIELD: &str = "image_data";
pub const ROLL_NO_FIELD: &str = "roll_no";

pub const DEFAULT_CAPTURE_WIDTH: u32 = 640;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 480;

/// Matches the browser default for `toDataURL("image/jpeg")`.
pub const JPEG_QUALITY: u8 = 92;

pub const DEFAULT_CAPTURE_INTERVAL_MS: u64 = 2000;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

use crate::capture::domain::still_image::StillImage;
use crate::recognition::domain::recognition_result::EnrollmentResult;

/// Registers a reference face for a roll number. Infallible like
/// [`FaceRecognizer`](super::face_recognizer::FaceRecognizer).
pub trait FaceEnroller: Send {
    fn enroll(&self, roll_no: &str, image: &StillImage) -> EnrollmentResult;
}

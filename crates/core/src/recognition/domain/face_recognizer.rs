use crate::capture::domain::still_image::StillImage;
use crate::recognition::domain::recognition_result::RecognitionResult;

/// Domain interface for identifying the person in a still.
///
/// Infallible by contract: transport and parse problems come back as
/// [`RecognitionResult::failure`].
pub trait FaceRecognizer: Send {
    fn recognize(&self, image: &StillImage) -> RecognitionResult;
}

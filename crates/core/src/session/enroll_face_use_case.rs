use crate::capture::domain::camera::Camera;
use crate::recognition::domain::face_enroller::FaceEnroller;
use crate::recognition::domain::recognition_result::EnrollmentResult;
use crate::session::take_attendance_use_case::SessionError;

/// Roll numbers are non-empty and strictly alphanumeric.
pub fn validate_roll_no(roll_no: &str) -> Result<&str, SessionError> {
    let trimmed = roll_no.trim();
    if trimmed.is_empty() || !trimmed.chars().all(char::is_alphanumeric) {
        return Err(SessionError::InvalidRollNo(roll_no.to_string()));
    }
    Ok(trimmed)
}

/// Captures one still and registers it as the reference face for a roll number.
pub struct EnrollFaceUseCase {
    camera: Camera,
    enroller: Box<dyn FaceEnroller>,
}

impl EnrollFaceUseCase {
    pub fn new(camera: Camera, enroller: Box<dyn FaceEnroller>) -> Self {
        Self { camera, enroller }
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The server's rejection (e.g. no face detected) is returned as an
    /// unsuccessful [`EnrollmentResult`], not as an error.
    pub fn execute(&mut self, roll_no: &str) -> Result<EnrollmentResult, SessionError> {
        let roll_no = validate_roll_no(roll_no)?;
        let still = self
            .camera
            .capture_image()?
            .ok_or(SessionError::CameraNotRunning)?;
        let result = self.enroller.enroll(roll_no, &still);
        if result.success {
            log::info!("Enrolled {roll_no}: {}", result.message);
        } else {
            log::warn!("Enrollment for {roll_no} failed: {}", result.message);
        }
        Ok(result)
    }
}

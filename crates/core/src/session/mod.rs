pub mod enroll_face_use_case;
pub mod session_logger;
pub mod take_attendance_use_case;

pub mod face_enroller;
pub mod face_recognizer;
pub mod recognition_result;

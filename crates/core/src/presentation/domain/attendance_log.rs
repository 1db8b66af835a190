use crate::presentation::domain::attendance_entry::AttendanceEntry;

/// Render target for the visible attendance log.
pub trait AttendanceLog: Send {
    fn append(&mut self, entry: &AttendanceEntry) -> Result<(), Box<dyn std::error::Error>>;
}

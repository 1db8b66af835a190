pub mod html_attendance_log;
pub mod terminal_attendance_log;

pub mod attendance_entry;
pub mod attendance_log;
pub mod time_formatter;

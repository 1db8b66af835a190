use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::presentation::domain::attendance_entry::AttendanceEntry;
use crate::presentation::domain::attendance_log::AttendanceLog;

/// Appends HTML fragments to a file, one `list-group-item` per entry.
///
/// The file holds bare fragments, meant to be included into a
/// `list-group` container by whatever page displays the log.
pub struct HtmlAttendanceLog {
    path: PathBuf,
}

impl HtmlAttendanceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AttendanceLog for HtmlAttendanceLog {
    fn append(&mut self, entry: &AttendanceEntry) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.render_html().as_bytes())?;
        Ok(())
    }
}

use std::io::Write;

use crate::presentation::domain::attendance_entry::AttendanceEntry;
use crate::presentation::domain::attendance_log::AttendanceLog;

/// Writes one text line per entry, flushing after each.
pub struct TerminalAttendanceLog<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalAttendanceLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalAttendanceLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AttendanceLog for TerminalAttendanceLog<W> {
    fn append(&mut self, entry: &AttendanceEntry) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(self.out, "{}", entry.render_text())?;
        self.out.flush()?;
        Ok(())
    }
}

use std::time::Instant;

use crossbeam_channel::{select, Receiver};
use thiserror::Error;

use crate::capture::domain::camera::{Camera, CaptureError};
use crate::presentation::domain::attendance_entry::AttendanceEntry;
use crate::presentation::domain::attendance_log::AttendanceLog;
use crate::presentation::domain::time_formatter::{current_date_time, Clock};
use crate::recognition::domain::face_recognizer::FaceRecognizer;
use crate::recognition::domain::recognition_result::RecognitionOutcome;
use crate::session::session_logger::{OutcomeKind, SessionLogger};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("failed to write attendance log: {0}")]
    Log(#[source] Box<dyn std::error::Error>),
    #[error("camera is not running")]
    CameraNotRunning,
    #[error("could not open camera source")]
    CameraUnavailable,
    #[error("roll number must be non-empty and alphanumeric, got '{0}'")]
    InvalidRollNo(String),
}

/// Result of one capture-and-recognize cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Camera not running; nothing was captured.
    Idle,
    Recorded(AttendanceEntry),
    /// The service did not produce a match. Carries its message.
    Rejected(String),
}

/// Counts of what a [`TakeAttendanceUseCase::run`] loop did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub ticks: usize,
    pub recorded: usize,
    pub rejected: usize,
}

/// Attendance loop: capture → recognize → format time → append entry.
///
/// Strictly sequential, so at most one recognition request is in flight.
pub struct TakeAttendanceUseCase {
    camera: Camera,
    recognizer: Box<dyn FaceRecognizer>,
    clock: Box<dyn Clock>,
    log: Box<dyn AttendanceLog>,
    logger: Box<dyn SessionLogger>,
}

impl TakeAttendanceUseCase {
    pub fn new(
        camera: Camera,
        recognizer: Box<dyn FaceRecognizer>,
        clock: Box<dyn Clock>,
        log: Box<dyn AttendanceLog>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            camera,
            recognizer,
            clock,
            log,
            logger,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Runs one cycle. Recognition failures are an outcome, not an error.
    pub fn tick(&mut self) -> Result<TickOutcome, SessionError> {
        let capture_start = Instant::now();
        let Some(still) = self.camera.capture_image()? else {
            self.logger.outcome(OutcomeKind::Idle);
            return Ok(TickOutcome::Idle);
        };
        self.logger.timing("capture", elapsed_ms(capture_start));

        let recognize_start = Instant::now();
        let result = self.recognizer.recognize(&still);
        self.logger.timing("recognize", elapsed_ms(recognize_start));

        let outcome = result.outcome();
        let time = current_date_time(self.clock.as_ref()).time;
        match AttendanceEntry::from_outcome(&outcome, &time) {
            Some(entry) => {
                self.log.append(&entry).map_err(SessionError::Log)?;
                let kind = match outcome {
                    RecognitionOutcome::Duplicate(_) => OutcomeKind::Duplicate,
                    _ => OutcomeKind::Marked,
                };
                self.logger.outcome(kind);
                self.logger.info(&entry.render_text());
                Ok(TickOutcome::Recorded(entry))
            }
            None => {
                let message = match outcome {
                    RecognitionOutcome::Failed(message) => message,
                    _ => result.message,
                };
                log::warn!("Recognition rejected: {message}");
                self.logger.outcome(OutcomeKind::Rejected);
                Ok(TickOutcome::Rejected(message))
            }
        }
    }

    /// Starts the camera and ticks on every `ticks` message until `stop`
    /// fires, either channel disconnects, or `max_captures` ticks ran.
    ///
    /// Fails with [`SessionError::CameraUnavailable`] when the camera cannot
    /// be started. The camera is stopped before returning, including on error.
    pub fn run(
        &mut self,
        ticks: &Receiver<Instant>,
        stop: &Receiver<()>,
        max_captures: Option<usize>,
    ) -> Result<SessionReport, SessionError> {
        if !self.camera.is_running() && !self.camera.start() {
            return Err(SessionError::CameraUnavailable);
        }
        let result = self.run_loop(ticks, stop, max_captures);
        self.camera.stop();
        self.logger.summary();
        result
    }

    fn run_loop(
        &mut self,
        ticks: &Receiver<Instant>,
        stop: &Receiver<()>,
        max_captures: Option<usize>,
    ) -> Result<SessionReport, SessionError> {
        let mut report = SessionReport::default();
        while max_captures.map_or(true, |max| report.ticks < max) {
            select! {
                recv(stop) -> _ => break,
                recv(ticks) -> msg => {
                    if msg.is_err() {
                        break;
                    }
                }
            }
            report.ticks += 1;
            match self.tick()? {
                TickOutcome::Recorded(_) => report.recorded += 1,
                TickOutcome::Rejected(_) => report.rejected += 1,
                TickOutcome::Idle => {}
            }
        }
        Ok(report)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

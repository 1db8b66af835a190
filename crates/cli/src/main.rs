use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use attendance_core::capture::domain::camera::Camera;
use attendance_core::capture::domain::capture_options::FacingMode;
use attendance_core::capture::infrastructure::image_directory_source::ImageDirectorySource;
use attendance_core::capture::infrastructure::jpeg_still_encoder::JpegStillEncoder;
use attendance_core::presentation::domain::attendance_entry::AttendanceEntry;
use attendance_core::presentation::domain::attendance_log::AttendanceLog;
use attendance_core::presentation::domain::time_formatter::{current_date_time, SystemClock};
use attendance_core::presentation::infrastructure::html_attendance_log::HtmlAttendanceLog;
use attendance_core::presentation::infrastructure::terminal_attendance_log::TerminalAttendanceLog;
use attendance_core::recognition::domain::face_recognizer::FaceRecognizer;
use attendance_core::recognition::domain::recognition_result::{
    failure_detail, RecognitionOutcome,
};
use attendance_core::recognition::infrastructure::http_recognition_client::HttpRecognitionClient;
use attendance_core::session::enroll_face_use_case::EnrollFaceUseCase;
use attendance_core::session::session_logger::StdoutSessionLogger;
use attendance_core::session::take_attendance_use_case::TakeAttendanceUseCase;
use attendance_core::shared::settings::Settings;

/// Face-recognition attendance kiosk.
#[derive(Parser)]
#[command(name = "attendance")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CommonArgs {
    /// Settings file (defaults to the per-user config location).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Attendance server base URL.
    #[arg(long, global = true)]
    server: Option<String>,

    /// Requested capture width.
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Requested capture height.
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Preferred camera: user or environment.
    #[arg(long, global = true)]
    facing_mode: Option<FacingMode>,
}

#[derive(Subcommand)]
enum Command {
    /// Capture periodically and mark attendance for recognized faces.
    Take {
        /// Image file or directory used as the camera.
        #[arg(long)]
        source: PathBuf,

        /// Milliseconds between captures.
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many captures.
        #[arg(long)]
        max_captures: Option<usize>,

        /// Also append HTML entries to this file.
        #[arg(long)]
        html_log: Option<PathBuf>,
    },
    /// Register a reference face for a roll number.
    Enroll {
        /// Image file or directory used as the camera.
        #[arg(long)]
        source: PathBuf,

        /// Alphanumeric roll number.
        #[arg(long)]
        roll_no: String,
    },
    /// Recognize a single image file and print the result.
    Recognize {
        image: PathBuf,
    },
}

/// Fans each entry out to several logs.
struct TeeAttendanceLog {
    logs: Vec<Box<dyn AttendanceLog>>,
}

impl AttendanceLog for TeeAttendanceLog {
    fn append(&mut self, entry: &AttendanceEntry) -> Result<(), Box<dyn std::error::Error>> {
        for log in &mut self.logs {
            log.append(entry)?;
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli.common)?;
    validate(&settings)?;

    match cli.command {
        Command::Take {
            source,
            interval_ms,
            max_captures,
            html_log,
        } => run_take(
            &settings,
            &source,
            interval_ms.unwrap_or(settings.interval_ms),
            max_captures.or(settings.max_captures),
            html_log,
        ),
        Command::Enroll { source, roll_no } => run_enroll(&settings, &source, &roll_no),
        Command::Recognize { image } => run_recognize(&settings, &image),
    }
}

fn resolve_settings(args: &CommonArgs) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(server) = &args.server {
        settings.server_url = server.clone();
    }
    if let Some(width) = args.width {
        settings.capture.width = width;
    }
    if let Some(height) = args.height {
        settings.capture.height = height;
    }
    if let Some(facing_mode) = args.facing_mode {
        settings.capture.facing_mode = facing_mode;
    }
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if !settings.server_url.starts_with("http://") && !settings.server_url.starts_with("https://")
    {
        return Err(format!(
            "Server URL must start with http:// or https://, got '{}'",
            settings.server_url
        )
        .into());
    }
    if settings.capture.width == 0 || settings.capture.height == 0 {
        return Err(format!(
            "Capture size must be positive, got {}x{}",
            settings.capture.width, settings.capture.height
        )
        .into());
    }
    if settings.interval_ms == 0 {
        return Err("Capture interval must be at least 1 ms".into());
    }
    Ok(())
}

fn open_camera(settings: &Settings, source: &Path) -> Camera {
    Camera::new(
        Box::new(ImageDirectorySource::new(source)),
        Box::new(JpegStillEncoder::new()),
        settings.capture,
    )
}

fn run_take(
    settings: &Settings,
    source: &Path,
    interval_ms: u64,
    max_captures: Option<usize>,
    html_log: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let camera = open_camera(settings, source);
    let mut logs: Vec<Box<dyn AttendanceLog>> = vec![Box::new(TerminalAttendanceLog::stdout())];
    if let Some(path) = html_log {
        log::info!("Appending HTML entries to {}", path.display());
        logs.push(Box::new(HtmlAttendanceLog::new(path)));
    }

    let label = current_date_time(&SystemClock);
    println!("Attendance for {}", label.date);

    let mut use_case = TakeAttendanceUseCase::new(
        camera,
        Box::new(HttpRecognitionClient::new(&settings.server_url)),
        Box::new(SystemClock),
        Box::new(TeeAttendanceLog { logs }),
        Box::new(StdoutSessionLogger::new()),
    );
    if !use_case.camera_mut().start() {
        return Err(format!("Could not open camera source {}", source.display()).into());
    }

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })?;
    println!("Press Ctrl+C to stop");

    let ticks = crossbeam_channel::tick(Duration::from_millis(interval_ms));
    let report = use_case.run(&ticks, &stop_rx, max_captures)?;
    log::info!(
        "Processed {} captures: {} recorded, {} rejected",
        report.ticks,
        report.recorded,
        report.rejected
    );
    Ok(())
}

fn run_enroll(
    settings: &Settings,
    source: &Path,
    roll_no: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let camera = open_camera(settings, source);
    let mut use_case =
        EnrollFaceUseCase::new(camera, Box::new(HttpRecognitionClient::new(&settings.server_url)));
    if !use_case.camera_mut().start() {
        return Err(format!("Could not open camera source {}", source.display()).into());
    }

    let result = use_case.execute(roll_no)?;
    if !result.success {
        return Err(failure_detail(&result.message).into());
    }
    println!("{}", result.message);
    Ok(())
}

fn run_recognize(settings: &Settings, image: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut camera = open_camera(settings, image);
    if !camera.start() {
        return Err(format!("Could not open image {}", image.display()).into());
    }
    let still = camera
        .capture_image()?
        .ok_or("Camera stopped before capture")?;
    camera.stop();

    let result = HttpRecognitionClient::new(&settings.server_url).recognize(&still);
    let outcome = result.outcome();
    let time = current_date_time(&SystemClock).time;
    match AttendanceEntry::from_outcome(&outcome, &time) {
        Some(entry) => {
            println!("{}", entry.render_text());
            Ok(())
        }
        None => match outcome {
            RecognitionOutcome::Failed(message) => Err(failure_detail(&message).into()),
            _ => Err(failure_detail(&result.message).into()),
        },
    }
}

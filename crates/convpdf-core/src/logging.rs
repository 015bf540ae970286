use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::time::{LocalTime, UtcTime};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::config_directory;

/// Filter directive variable checked before `RUST_LOG`.
pub const LOG_FILTER_ENV_VAR: &str = "CONVPDF_LOG";
const LOG_FILE_NAME: &str = "convpdf.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Controls where structured logs are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingDestination {
    /// Persistent file plus stderr, for the command line.
    FileAndStderr,
    /// Persistent file only, for the GUI.
    FileOnly,
    /// Stderr only.
    StderrOnly,
}

impl LoggingDestination {
    fn writes_file(self) -> bool {
        !matches!(self, LoggingDestination::StderrOnly)
    }

    fn writes_stderr(self) -> bool {
        !matches!(self, LoggingDestination::FileOnly)
    }
}

#[derive(Debug)]
struct LoggingGuards {
    _guard: Option<WorkerGuard>,
    log_path: Option<PathBuf>,
}

static LOGGING_STATE: OnceLock<LoggingGuards> = OnceLock::new();

/// Errors that can arise while standing up structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to prepare log directory: {0}")]
    Io(#[from] io::Error),
    #[error("invalid logging filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to install logging subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. The first call wins; later calls only
/// return the log file path chosen by the first.
pub fn init_logging(
    destination: LoggingDestination,
) -> Result<Option<&'static PathBuf>, LoggingError> {
    if LOGGING_STATE.get().is_none() {
        let guards = install_logging(destination)?;
        // Lost a race with another initializer; its guards stay in place.
        let _ = LOGGING_STATE.set(guards);
    }
    Ok(current_log_path())
}

pub fn current_log_path() -> Option<&'static PathBuf> {
    LOGGING_STATE
        .get()
        .and_then(|guards| guards.log_path.as_ref())
}

fn install_logging(destination: LoggingDestination) -> Result<LoggingGuards, LoggingError> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;
    let mut log_path = None;

    if destination.writes_file() {
        let dir = config_directory().join("logs");
        fs::create_dir_all(&dir)?;
        let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer)
                .with_ansi(false)
                .boxed(),
        );
        guard = Some(worker_guard);
        log_path = Some(dir.join(LOG_FILE_NAME));
    }

    if destination.writes_stderr() {
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime::rfc_3339())
                .with_target(true)
                .with_writer(io::stderr)
                .with_ansi(false)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(build_filter()?)
        .try_init()?;

    if let Some(path) = log_path.as_ref() {
        info!(path = %path.display(), "Structured logging enabled");
    }

    Ok(LoggingGuards {
        _guard: guard,
        log_path,
    })
}

fn build_filter() -> Result<EnvFilter, ParseError> {
    match env::var(LOG_FILTER_ENV_VAR) {
        Ok(spec) if !spec.trim().is_empty() => EnvFilter::try_new(spec),
        _ => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")),
    }
}

//! Logging setup for the `due-dates` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary through [`init_logging`].
//!
//! - `error`: fatal run errors
//! - `warn`: rejected records (invalid date or terms code)
//! - `info`: run start and end, stage progress
//! - `debug`: per-record due dates, config overrides

use std::io;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// The current log file plus two rotated days.
const MAX_LOG_FILES: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    pub level: Level,
    /// Write to a daily rotated file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Maps the number of `-v` flags to a level: none is info, one is debug,
    /// more is trace.
    pub fn from_verbosity(verbosity: u64) -> Self {
        let level = match verbosity {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Default::default()
        }
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

/// Installs the global subscriber. Call once, at startup.
///
/// Log files get timestamps and no colors; stderr output stays compact.
pub fn init_logging(config: &LogConfig) -> Result<(), InitError> {
    let filter = build_env_filter(config.level);

    match &config.log_file {
        Some(path) => {
            let layer = fmt::layer()
                .with_writer(file_appender(path)?)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        None => {
            let layer = fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time();

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
    }

    Ok(())
}

/// Builds a daily rotating appender for `path`.
///
/// `logs/due-dates.log` is written as `logs/due-dates.<YYYY-MM-DD>.log`, and
/// only the newest [`MAX_LOG_FILES`] files are kept.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "due-dates".to_string());

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(MAX_LOG_FILES);
    if let Some(extension) = path.extension() {
        builder = builder.filename_suffix(extension.to_string_lossy().into_owned());
    }

    builder.build(directory)
}

/// RUST_LOG, when set, takes precedence over the configured level.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,invoice_due_dates={level},due_dates={level}"))
    })
}

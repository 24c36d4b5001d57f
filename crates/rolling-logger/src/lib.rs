//! Rolling Logger
//!
//! Process-wide logger built on `tracing-subscriber`:
//! - daily-rolled log files with a retention limit
//! - in-memory circular buffer of the latest lines
//! - `log` records bridged into `tracing`, so crates using the `log` facade
//!   end up in the same files

mod buffer;
mod writer;

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

pub use buffer::RingBuffer;
pub use writer::RollingFileWriter;

/// Number of daily files kept on disk
pub const DEFAULT_MAX_FILES: usize = 7;
/// Number of lines kept in memory
pub const DEFAULT_BUFFER_LINES: usize = 500;

static LOGGER: OnceLock<RollingFileWriter> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to open log directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Initialize the global logger at debug level
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with_level(log_dir, app_name, log::LevelFilter::Debug)
}

/// Initialize the global logger, dropping records below `level`
pub fn init_logger_with_level(
    log_dir: PathBuf,
    app_name: &str,
    level: log::LevelFilter,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingFileWriter::new(&log_dir, app_name, DEFAULT_MAX_FILES, DEFAULT_BUFFER_LINES)
        .map_err(|source| LoggerError::Io { path: log_dir.clone(), source })?;

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(to_tracing_level(level))
        .finish()
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    LOGGER.set(writer).map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(target: "rolling_logger", "logger started in {}", log_dir.display());
    Ok(())
}

/// Latest buffered lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|writer| writer.recent_lines()).unwrap_or_default()
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!(target: "rolling_logger", "{}", message);
    Ok(())
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::warn!(target: "rolling_logger", "{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!(target: "rolling_logger", "{}", message);
    Ok(())
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

fn to_tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_tracing_level(log::LevelFilter::Warn), LevelFilter::WARN);
        assert_eq!(to_tracing_level(log::LevelFilter::Off), LevelFilter::OFF);
    }

    // Single test touching the global: the subscriber can only be installed once per process.
    #[test]
    fn test_global_logger_lifecycle() {
        assert!(matches!(info("too early"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines().is_empty());

        let dir = tempfile::tempdir().unwrap();
        init_logger(dir.path().to_path_buf(), "Test").unwrap();

        info("hello from tests").unwrap();
        log::warn!("bridged from log");

        let lines = recent_lines();
        assert!(lines.iter().any(|line| line.contains("hello from tests")));
        assert!(lines.iter().any(|line| line.contains("bridged from log")));

        assert!(matches!(
            init_logger(dir.path().to_path_buf(), "Test"),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}

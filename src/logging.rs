//! Structured logging setup
//!
//! Report commands log to stderr. The TUI owns the terminal, so it logs to
//! `<data dir>/copilot-metrics.log` instead. Filter via `COPILOT_METRICS_LOG`
//! (e.g. `COPILOT_METRICS_LOG=copilot_metrics=debug`), default `warn`.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::types::{MetricsError, Result};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "COPILOT_METRICS_LOG";

const DEFAULT_LEVEL: &str = "warn";
const LOG_FILE: &str = "copilot-metrics.log";

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "copilot_metrics=debug"
        } else {
            DEFAULT_LEVEL
        })
    })
}

/// Log to stderr (report commands)
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}

/// Log to a file under the user's data directory (TUI).
/// Keep the returned guard alive until exit so buffered events are flushed.
pub fn init_file(verbose: bool) -> Result<WorkerGuard> {
    let (writer, guard) = file_writer(&log_dir()?)?;

    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init();

    Ok(guard)
}

/// Non-blocking writer appending to `<dir>/copilot-metrics.log`, creating `dir` if needed
fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)
        .map_err(std::io::Error::other)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Directory holding the log file
pub fn log_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "copilot-metrics")
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .ok_or_else(|| MetricsError::Config("failed to resolve data directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_app_specific() {
        if let Ok(dir) = log_dir() {
            assert!(dir.to_string_lossy().contains("copilot-metrics"));
        }
    }

    #[test]
    fn test_file_writer_creates_log() {
        use std::io::Write;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        {
            let (mut writer, _guard) = file_writer(&dir).unwrap();
            writer.write_all(b"fetch failed\n").unwrap();
        }

        let content = std::fs::read_to_string(dir.join(LOG_FILE)).unwrap();
        assert_eq!(content, "fetch failed\n");
    }
}

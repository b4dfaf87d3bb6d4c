//! Logging initialization
//!
//! Logs are written through a non-blocking writer to stderr or to a file.
//! Stdout is reserved for published version entries.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

const DEFAULT_LOG_FILE: &str = "atlassian-version-collector.log";

/// Initialize the global tracing subscriber from config.
///
/// Falls back to `RUST_LOG` env var; if unset, uses `cfg.level`.
/// The returned guard flushes buffered lines on drop and must be held until exit.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let (writer, guard) = match &cfg.file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path);
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(cfg.file.is_none());

    match cfg.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.with_target(true).compact().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(guard)
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path.file_name().unwrap_or(OsStr::new(DEFAULT_LOG_FILE));
    (dir.to_path_buf(), PathBuf::from(file_name))
}

//! Application logging
//!
//! Installs the global `tracing` subscriber. Headless commands log to stderr;
//! the TUI owns the terminal, so while it runs logs go to a daily file under
//! ~/.config/sitetheme/logs/.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "sitetheme.log";

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Daily rolling file in this directory
    File(PathBuf),
}

/// Parse a filter directive such as "info" or "sitetheme=debug,warn"
pub fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))
}

/// Path of today's log file in `logs_dir`
pub fn current_log_file(logs_dir: &Path) -> PathBuf {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    logs_dir.join(format!("{}.{}", LOG_FILE_PREFIX, timestamp))
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes the
/// file writer and must be held until the program exits.
pub fn init(level: &str, destination: &LogDestination) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(level)?,
    };

    match destination {
        LogDestination::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;
            Ok(None)
        }
        LogDestination::File(logs_dir) => {
            fs::create_dir_all(logs_dir)?;
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

            info!(
                "=== sitetheme started at {} ===",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            );
            info!("Logs redirected to: {:?}", current_log_file(logs_dir));
            Ok(Some(guard))
        }
    }
}

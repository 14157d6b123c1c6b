//! File logging via tracing
//!
//! The terminal belongs to the TUI (or to JSON output in headless mode), so
//! log lines go to a daily-rotated file under the user's data directory.

use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

use crate::error::{Error, Result};

/// Filter directives, e.g. `CANARY_LOG=canary_api=trace`
pub const LOG_ENV: &str = "CANARY_LOG";

/// Overrides the log directory
pub const LOG_DIR_ENV: &str = "CANARY_LOG_DIR";

const LOG_FILE: &str = "canary.log";

const DEFAULT_FILTER: &str =
    "canary=info,canary_core=info,canary_api=info,canary_app=info,canary_tui=info,warn";

/// Install the global subscriber.
///
/// Lines are written on a background thread; keep the returned guard alive
/// until exit or the tail of the log is lost.
pub fn init() -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        &log_dir, LOG_FILE,
    ));

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::config(format!("logging already initialized: {}", e)))?;

    tracing::info!("Logging to {}", log_dir.join(LOG_FILE).display());
    Ok(guard)
}

/// `$CANARY_LOG_DIR`, else `<data_local_dir>/canary/logs`
pub fn log_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("canary")
        .join("logs")
}

//! File-backed tracing setup.
//!
//! The terminal UI owns stdout and stderr while it runs, so every log line goes to a file.

use std::{fs, path::Path};

use color_eyre::eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Name of the log file created inside the log directory.
pub const LOG_FILE: &str = "maze-chase.log";

/// Installs the global subscriber, writing to [`LOG_FILE`] inside `dir`.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. The returned guard flushes pending
/// lines when dropped, so it has to live until the program exits.
///
/// # Errors
///
/// Fails if the directory cannot be created or a global subscriber is already installed.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    tracing::info!(file = %dir.join(LOG_FILE).display(), "logging initialized");

    Ok(guard)
}

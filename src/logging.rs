//! Tracing subscriber setup shared by both binaries.

use std::fs::OpenOptions;
use std::io;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::sanitize::{self, SanitizingMakeWriter};
use crate::config::{LogConfig, LogMode};

/// Read [`LogConfig`] from the environment and install the global subscriber.
///
/// # Errors
/// Returns `PrmError::Config` for invalid `PRM_*` variables and
/// `PrmError::Io` if the log file cannot be opened.
pub fn init_from_env(default_mode: LogMode, default_level: &str) -> crate::Result<WorkerGuard> {
    init_from_lookup(default_mode, default_level, |var| std::env::var(var).ok())
}

fn init_from_lookup<F>(
    default_mode: LogMode,
    default_level: &str,
    lookup: F,
) -> crate::Result<WorkerGuard>
where
    F: Fn(&str) -> Option<String>,
{
    let config = LogConfig::from_lookup(default_mode, lookup)?;
    Ok(init(&config, default_level)?)
}

/// Install the global subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset or invalid. Output goes
/// through a non-blocking writer with identifier redaction; keep the
/// returned guard alive until exit or buffered lines are lost.
///
/// # Errors
/// Returns an I/O error if the log file cannot be opened.
pub fn init(config: &LogConfig, default_level: &str) -> io::Result<WorkerGuard> {
    sanitize::set_max_bytes(config.sanitize_max_bytes);
    let (writer, guard) = open_writer(config)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(config.mode == LogMode::Stderr)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .try_init();

    Ok(guard)
}

fn open_writer(config: &LogConfig) -> io::Result<(NonBlocking, WorkerGuard)> {
    Ok(match config.mode {
        LogMode::Stderr => tracing_appender::non_blocking(io::stderr()),
        LogMode::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogMode::File => {
            if let Some(parent) = config.file.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.file)?;
            tracing_appender::non_blocking(file)
        }
    })
}

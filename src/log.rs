//! Tracing setup for the `desktop-autostart` binary.
//!
//! Records go to stderr and to a non-blocking log file. `RUST_LOG` overrides the default
//! level. The library half of the crate never logs.

// -- std imports
use std::{path::PathBuf, sync::OnceLock};

// -- crate imports (conditional)
#[cfg(all(debug_assertions, feature = "tokio-console"))]
use console_subscriber::ConsoleLayer;

// -- crate imports
use anyhow::{Context, Result};
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*, registry::Registry};

/// Keeps the file writer's worker thread alive until the process exits.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const APP_PREFIX: &str = "desktop-autostart";
const LOG_FILE_NAME: &str = "desktop-autostart.log";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::DEBUG;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Location of the log file: `$XDG_DATA_HOME/desktop-autostart/desktop-autostart.log`.
///
/// # Errors
/// - [`anyhow::Error`] if the XDG data directory cannot be determined or created.
pub fn log_filepath() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .place_data_file(LOG_FILE_NAME)
        .with_context(|| "Could not determine log file path")
}

/// Build the non-blocking file writer and park its guard in [`LOG_GUARD`].
fn build_file_writer() -> Result<NonBlocking> {
    let path = log_filepath()?;
    let dir = path
        .parent()
        .context("Could not determine log file directory")?;
    let file_name = path
        .file_name()
        .context("Could not determine log file name")?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}

/// Install the global subscriber.
///
/// With `quiet` set a no-op subscriber is installed instead, so `--no-log` silences every
/// record including those emitted before argument handling finishes.
///
/// # Errors
/// - [`anyhow::Error`] if a global subscriber was already installed.
pub fn init_tracing(quiet: bool) -> Result<()> {
    if quiet {
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())
            .context("Failed to set no-op subscriber")?;
        return Ok(());
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(LOG_LEVEL.into())
        .from_env_lossy();

    // stdout carries the report, so logs go to stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(cfg!(debug_assertions))
        .with_line_number(cfg!(debug_assertions))
        .with_target(false)
        .with_filter(env_filter.clone());

    match build_file_writer() {
        Ok(writer) => {
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(false)
                .with_writer(writer)
                .with_filter(env_filter);

            #[cfg(all(debug_assertions, feature = "tokio-console"))]
            let subscriber = Registry::default()
                .with(stderr_layer)
                .with(file_layer)
                .with(ConsoleLayer::builder().spawn());

            #[cfg(not(all(debug_assertions, feature = "tokio-console")))]
            let subscriber = Registry::default().with(stderr_layer).with(file_layer);

            tracing::subscriber::set_global_default(subscriber)?;
        }
        Err(e) => {
            tracing::subscriber::set_global_default(Registry::default().with(stderr_layer))?;
            warn!("File logging unavailable, logging to stderr only: {e:#}");
        }
    }

    Ok(())
}

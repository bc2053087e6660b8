//! Tracing and logging configuration for the client
//!
//! The terminal UI owns stdout, so logs never go there: they are written to stderr, or to a
//! rolling file when a log directory is configured.

use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Environment, error::ClientError};

const LOG_FILE_PREFIX: &str = "wikiquiz";

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed, human-readable logs on stderr
/// - Default level: DEBUG
/// - Shows file locations and line numbers
///
/// # Production Mode
/// - Without a log directory: compact logs on stderr, default level WARN
/// - With a log directory: JSON logs in a daily rolling file, default level INFO
///
/// The returned guard flushes the file writer on drop and must be held for the lifetime of
/// the program.
///
/// # Environment Variables
/// - `RUST_LOG`: Override default log level (e.g., `RUST_LOG=debug,reqwest=trace`)
pub fn init_tracing(
    env: &Environment,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, ClientError> {
    match (env.is_development(), log_dir) {
        (true, _) => {
            init_development_tracing();
            Ok(None)
        }
        (false, Some(dir)) => init_file_tracing(dir).map(Some),
        (false, None) => {
            init_production_tracing();
            Ok(None)
        }
    }
}

/// Initialize development-friendly tracing with pretty output
fn init_development_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug,hyper_util=info,reqwest=info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

/// Initialize quiet production tracing on stderr
fn init_production_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_target(false)
                .with_filter(env_filter),
        )
        .init();
}

/// Initialize production tracing with JSON output to a rolling file
fn init_file_tracing(dir: &Path) -> Result<WorkerGuard, ClientError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::info!(dir = %dir.display(), "Tracing initialized with file output");
    Ok(guard)
}

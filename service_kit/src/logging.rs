use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

pub const ERROR_LOG_FILE: &str = "error.log";
pub const COMBINED_LOG_FILE: &str = "combined.log";

/// Keeps the non-blocking file writers alive.
///
/// Dropping it flushes whatever is still buffered, so hold it in `main` for
/// the lifetime of the process.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Installs the global subscriber:
/// - console: compact text, every enabled event
/// - `<log_dir>/combined.log`: JSON lines, every enabled event
/// - `<log_dir>/error.log`: JSON lines, ERROR only
///
/// `RUST_LOG` wins over `config.log_level` when set.
pub fn init_logging(config: &ServiceConfig) -> Result<LogGuard> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| Error::Logging(format!("invalid filter '{}': {}", config.log_level, e)))?,
    };

    let (file_layers, guard) = file_layers(&config.log_dir)?;
    let console_layer = fmt::layer().compact().with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layers)
        .with(console_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(guard)
}

/// JSON-lines layers for `combined.log` (everything) and `error.log` (ERROR only).
///
/// Creates `log_dir` if needed. Events reach the files only while the
/// returned guard is alive.
pub fn file_layers<S>(log_dir: &Path) -> Result<(Vec<Box<dyn Layer<S> + Send + Sync>>, LogGuard)>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(log_dir)?;

    let (combined_writer, combined_guard) =
        tracing_appender::non_blocking(file_appender(log_dir, COMBINED_LOG_FILE)?);
    let (error_writer, error_guard) =
        tracing_appender::non_blocking(file_appender(log_dir, ERROR_LOG_FILE)?);

    let combined_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(combined_writer)
        .with_ansi(false)
        .boxed();
    let error_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(error_writer)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR)
        .boxed();

    Ok((
        vec![combined_layer, error_layer],
        LogGuard {
            _guards: vec![combined_guard, error_guard],
        },
    ))
}

fn file_appender(dir: &Path, file_name: &str) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| Error::Logging(format!("cannot open {}: {}", dir.join(file_name).display(), e)))
}

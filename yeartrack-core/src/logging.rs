//! Logging infrastructure for yeartrack
//!
//! Every run appends to a daily-rotated file under the XDG state directory
//! (`~/.local/state/yeartrack/yeartrack.log`). Warnings can optionally be
//! mirrored to stderr so swallowed article failures are visible at the
//! terminal.
//!
//! Credentials never reach a log line: [`crate::Credential`] redacts its
//! token in `Debug` output.

use crate::config::{Config, LoggingConfig};
use tracing_subscriber::{
    filter::LevelFilter, fmt, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Layer,
};

/// File name prefix for the rolling log.
pub const LOG_FILE_NAME: &str = "yeartrack.log";

/// Install the global subscriber.
///
/// The level comes from `RUST_LOG` when set, otherwise from the config.
/// Keep the returned guard alive for the whole run; dropping it flushes the
/// file writer.
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let stderr_layer = config.warnings_to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

/// Route logs through the test harness writer. Safe to call repeatedly.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Flushes pending log writes when dropped.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

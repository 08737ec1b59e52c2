// ============================================
// src/logging.rs
// File-only tracing setup; the terminal belongs to the UI
// ============================================

use std::io;
use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "practica.log";

/// Subscriber writing to `log_dir/practica.log` through a background worker.
///
/// Buffered lines are flushed when the returned guard is dropped.
pub fn file_subscriber(
    log_dir: &Path,
) -> io::Result<(impl Subscriber + Send + Sync + 'static, WorkerGuard)> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);
    Ok((subscriber, guard))
}

/// Installs the file subscriber globally. Hold the guard until exit.
pub fn init(log_dir: &Path) -> io::Result<WorkerGuard> {
    let (subscriber, guard) = file_subscriber(log_dir)?;
    subscriber.init();
    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_guard_flushes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, guard) = file_subscriber(dir.path()).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(activity = "states", "drill started");
        });
        drop(guard);

        let written = std::fs::read_to_string(dir.path().join(LOG_FILE)).unwrap();
        assert!(written.contains("drill started"), "log was: {written:?}");
        assert!(written.contains("activity=\"states\""));
    }
}

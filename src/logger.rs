use crate::error::AppError;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Route tracing output to `path`. The returned guard flushes pending lines
/// when dropped, so keep it alive for the whole run.
pub fn init(path: &Path) -> Result<WorkerGuard, AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logging(format!("{}: {}", path.display(), e)))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.log");

        // Another test may already own the global subscriber.
        if let Ok(guard) = init(&path) {
            tracing::error!("Test log message");
            drop(guard);
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("Test log message"));
        }
        assert!(path.exists());
    }

    #[test]
    fn test_logger_init_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quiz.log");
        assert!(matches!(init(&path), Err(AppError::Logging(_))));
    }
}

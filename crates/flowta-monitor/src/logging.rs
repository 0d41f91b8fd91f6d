//! Logging setup.

use std::path::Path;

use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Filter from `RUST_LOG`, or `level` when it is unset or invalid.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Daily rolling appender for `path`. The date is appended to the file name.
pub fn log_file_appender(path: &Path) -> RollingFileAppender {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "flowta.log".to_string());

    rolling::daily(directory, prefix)
}

/// Setup logging with the given level.
///
/// When `file` is given, logs are also written to a daily rolling file.
/// The returned guard flushes that file and must be kept alive until exit.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = build_filter(level);

    let (file_layer, guard) = match file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(log_file_appender(path));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let result = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().pretty()).try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_appender_writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut appender = log_file_appender(&dir.path().join("run.log"));
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("run.log"));
    }

    #[test]
    fn test_setup_logging_twice() {
        let _guard = setup_logging("info", false, None);
        assert!(setup_logging("debug", true, None).is_none());
    }
}

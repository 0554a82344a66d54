//! Logging system initialization
//!
//! Sets up the tracing subscriber from the `[logging]` section of the configuration.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

const DEFAULT_LOG_NAME: &str = "attendance.log";

/// Writer selected from the logging configuration
///
/// Falls back to stdout (with a note on stderr) when the file can't be opened,
/// the service should still come up.
fn build_writer(logging: &LoggingConfig) -> Box<dyn std::io::Write + Send + Sync> {
    let Some(log_file) = logging.file.as_deref().filter(|f| !f.is_empty()) else {
        return Box::new(std::io::stdout());
    };

    let path = Path::new(log_file);
    if logging.enable_rotation {
        let dir = path.parent().unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_NAME);
        match rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(logging.max_backups.max(1) as usize)
            .build(dir)
        {
            Ok(appender) => Box::new(appender),
            Err(e) => {
                eprintln!("[WARN] Failed to create rolling log appender: {}, using stdout", e);
                Box::new(std::io::stdout())
            }
        }
    } else {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("[WARN] Failed to open log file {}: {}, using stdout", log_file, e);
                Box::new(std::io::stdout())
            }
        }
    }
}

/// Initialize logging system based on configuration
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so buffered log lines get flushed. Calling this twice keeps the
/// first subscriber.
pub fn init_logging(logging: &LoggingConfig) -> WorkerGuard {
    let writer = build_writer(logging);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&logging.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let to_console = logging.file.as_deref().is_none_or(str::is_empty);
    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let result = if logging.format.eq_ignore_ascii_case("json") {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("[WARN] Logging already initialized: {}", e);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_file_writer() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.log");
        let logging = LoggingConfig {
            file: Some(file.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = build_writer(&logging);
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello\n");
    }

    #[test]
    fn test_unwritable_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        // 目录本身不能当文件打开
        let logging = LoggingConfig {
            file: Some(dir.path().to_string_lossy().into_owned()),
            enable_rotation: false,
            ..Default::default()
        };
        let mut writer = build_writer(&logging);
        assert!(writer.write_all(b"").is_ok());
    }
}

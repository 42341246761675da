//! Logging setup for the binary

use std::path::Path;

/// Initialize the global tracing subscriber.
///
/// Writes to stdout, or to a daily rolling file under `log_dir` when that
/// directory exists. `RUST_LOG` overrides `level` when set.
pub fn init_logger(level: &str, log_dir: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if Path::new(dir).is_dir() {
            let file_appender = tracing_appender::rolling::daily(dir, "fisho-pos");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}

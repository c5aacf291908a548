//! Tracing bootstrap: env-filtered fmt layer to stderr, plus an optional
//! non-blocking rolling file appender.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber from `log_level` (an `EnvFilter`
/// directive, e.g. `"info"` or `"pf_sim=debug,pf_steering=warn"`) and,
/// if `log_file` is set, tees output to a never-rotated file there.
///
/// Returns the file appender's guard — the caller must hold it for the
/// process lifetime, or buffered lines never flush.
pub fn init(log_level: &str, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let dir = std::path::Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| std::path::Path::new("."));
            let file_name = std::path::Path::new(path).file_name().ok_or_else(|| anyhow::anyhow!("log_file has no file name: {path}"))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            Ok(None)
        }
    }
}

//! Observability and structured logging infrastructure.
//!
//! The interceptor's default sink writes through `tracing`; this module
//! installs the subscriber those events end up in.
//!
//! # Features
//!
//! - **Multiple Formats**: Console (pretty/JSON) and file output
//! - **Environment Filtering**: RUST_LOG variable support
//! - **Span Tracking**: downstream logs carry the `http_request` span
//!
//! # Usage
//!
//! ```no_run
//! use http_request_logger::observability;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Keep the guard alive for the lifetime of the program
//! let _guard = observability::init_tracing(None, None, false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Configuration
//!
//! ```bash
//! # Set log level for all modules
//! RUST_LOG=debug cargo run -- serve
//!
//! # Only the request lines
//! RUST_LOG=http_request_logger::requests=info cargo run -- serve
//!
//! # JSON output plus a rotating file
//! LOG_JSON=true LOG_FILE=./logs/requests.log cargo run -- serve
//! ```

use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{LoggerError, LoggerResult};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "http_request_logger=info,tower_http=warn,warn";

/// Initialize the tracing subscriber with configurable output formats.
///
/// # Arguments
///
/// * `log_level` - Optional filter directive (e.g. "debug"). `RUST_LOG` wins when set.
/// * `log_file` - Optional file path for JSON output with daily rotation.
/// * `json_output` - JSON console output instead of the pretty format.
///
/// Returns the file writer's guard when file logging is enabled; dropping it
/// flushes and stops the background writer, so hold it until shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - The log file's directory cannot be created
/// - A global subscriber is already installed
pub fn init_tracing(
    log_level: Option<&str>,
    log_file: Option<&Path>,
    json_output: bool,
) -> LoggerResult<Option<WorkerGuard>> {
    let env_filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), log_level);

    // Console layer (stdout)
    let console_layer = if json_output {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    };

    // File layer (optional)
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(directory).map_err(|e| {
                LoggerError::observability(
                    format!("cannot create log directory {}", directory.display()),
                    Some(Box::new(e)),
                )
            })?;

            let file_appender = tracing_appender::rolling::daily(
                directory,
                path.file_name().unwrap_or_else(|| OsStr::new("requests.log")),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // File always uses JSON for structured log analysis
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| {
            LoggerError::observability("failed to install tracing subscriber", Some(Box::new(e)))
        })?;

    info!(
        json_output,
        file_logging = log_file.is_some(),
        "Tracing initialized successfully"
    );

    Ok(guard)
}

/// Resolve the filter: `RUST_LOG`, then the explicit level, then [`DEFAULT_FILTER`].
fn build_filter(rust_log: Option<&str>, log_level: Option<&str>) -> EnvFilter {
    rust_log
        .or(log_level)
        .map_or_else(|| EnvFilter::new(DEFAULT_FILTER), EnvFilter::new)
}

/// Initialize tracing with test-specific configuration.
///
/// Output goes to the test harness; see it with `cargo test -- --nocapture`.
/// Safe to call from every test.
pub fn init_test_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_prefers_rust_log() {
        let filter = build_filter(Some("trace"), Some("debug"));
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    fn test_filter_uses_explicit_level() {
        let filter = build_filter(None, Some("debug"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_filter_default() {
        let filter = build_filter(None, None);
        let rendered = filter.to_string();
        assert!(rendered.contains("http_request_logger=info"));
        assert!(rendered.contains("tower_http=warn"));
    }

    #[test]
    fn test_second_init_reports_error() {
        init_test_tracing();
        // A global subscriber is installed by now, either here or by another test
        let result = init_tracing(Some("info"), None, false);
        assert!(matches!(result, Err(LoggerError::ObservabilityError { .. })));
    }
}

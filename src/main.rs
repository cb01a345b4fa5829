//! CLI entry point for the request logger demo host.
//!
//! ```text
//! main.rs (Runtime Initialization)
//!     ↓
//! CLI Layer (src/cli.rs)
//!     ↓
//! 1. Config Layer (src/config.rs)       → Load environment variables
//! 2. API Layer (src/api/server.rs)      → Router + middleware stack
//! 3. Interceptor (src/interceptor)      → Four log lines per request
//! ```
//!
//! All errors bubble up via `LoggerResult<T>`.

use http_request_logger::{cli, config::Config, observability};
use std::path::PathBuf;
use tracing::error;

/// Entry point for the request logger demo host.
///
/// Initializes:
/// - Tokio async runtime (via `#[tokio::main]`)
/// - Structured logging with tracing (RUST_LOG, LOG_JSON, LOG_FILE)
///
/// Then delegates to the CLI module.
#[tokio::main]
async fn main() {
    // Logging settings come from the same environment as the server settings:
    //   RUST_LOG=debug cargo run -- serve
    //   LOG_JSON=true LOG_FILE=./logs/requests.log cargo run -- serve
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let guard = match observability::init_tracing(
        config.log_level(),
        config.log_file().map(PathBuf::as_path),
        config.log_json(),
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize tracing: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cli::run(config).await {
        error!(error = %e, "Application error");
        eprintln!("Error: {e}");
        // Flush buffered file logs before exiting
        drop(guard);
        std::process::exit(1);
    }
}

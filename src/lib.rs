//! # HTTP Request Logger
//!
//! Request/response logging interceptor with timing for tower and axum
//! pipelines.
//!
//! Every request passing through the interceptor produces four log lines:
//!
//! ```text
//! Incoming GET request to http://host/health
//! Request started at: 2024-05-01 09:30:12.123456
//! Request completed with status 200
//! Request duration: 0.010 seconds
//! ```
//!
//! When the downstream stage fails, only the first two lines are written and
//! the error reaches the caller unchanged.
//!
//! ## Architecture
//!
//! 1. **Interceptor** ([`interceptor`]) - The logging decorator, its sinks and views
//! 2. **API Layer** ([`api`]) - axum middleware adapter and a demo host
//! 3. **Config Layer** ([`config`]) - Environment variable loading
//! 4. **Observability** ([`observability`]) - tracing subscriber setup
//!
//! ## Quick Start
//!
//! ### Using the CLI
//!
//! ```bash
//! cargo run --release -- serve --port 8000
//! curl http://localhost:8000/health
//! ```
//!
//! ### Using as a Library
//!
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use http_request_logger::interceptor::RequestLoggingLayer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app: Router = Router::new()
//!         .route("/health", get(|| async { "ok" }))
//!         .layer(RequestLoggingLayer::tracing());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The crate's own fallible operations return
//! [`error::LoggerResult<T>`](error::LoggerResult). The interceptor never
//! wraps downstream errors.
//!
//! ## Testing
//!
//! ```bash
//! # All tests
//! cargo test
//!
//! # Unit tests only
//! cargo test --lib
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod observability;

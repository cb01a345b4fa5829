//! Error types for the request logger.
//!
//! The interceptor itself never introduces errors: whatever the downstream
//! stage fails with is handed back to the caller untouched. [`LoggerError`]
//! only covers the crate's own fallible surfaces.
//!
//! # Design
//!
//! The error hierarchy is organized by layer:
//! - [`LoggerError::ConfigError`]: Configuration and environment issues
//! - [`LoggerError::ServerError`]: Binding and serving the demo host
//! - [`LoggerError::ObservabilityError`]: Logging subscriber setup
//!
//! # Example
//!
//! ```
//! use http_request_logger::error::{LoggerError, LoggerResult};
//!
//! fn validate_port(port: u16) -> LoggerResult<()> {
//!     if port == 0 {
//!         return Err(LoggerError::config("port cannot be zero", None));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Result type alias using [`LoggerError`].
pub type LoggerResult<T> = Result<T, LoggerError>;

/// Boxed source error carried by [`LoggerError`] variants.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type for the request logger crate.
#[derive(Debug)]
pub enum LoggerError {
    /// Configuration or environment variable errors.
    ///
    /// Variants include:
    /// - Unparseable ports or addresses
    /// - Non-boolean flags
    ConfigError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Errors raised while binding or serving the HTTP host.
    ServerError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },

    /// Errors raised while installing the tracing subscriber.
    ObservabilityError {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        source: Option<BoxedSource>,
    },
}

impl LoggerError {
    /// Create a new configuration error.
    ///
    /// # Example
    ///
    /// ```
    /// use http_request_logger::error::LoggerError;
    ///
    /// let err = LoggerError::config("SERVER_PORT must be a number", None);
    /// assert!(matches!(err, LoggerError::ConfigError { .. }));
    /// ```
    #[must_use]
    pub fn config(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source,
        }
    }

    /// Create a new observability error.
    #[must_use]
    pub fn observability(message: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self::ObservabilityError {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, .. } => write!(f, "Configuration error: {message}"),
            Self::ServerError { message, .. } => write!(f, "Server error: {message}"),
            Self::ObservabilityError { message, .. } => {
                write!(f, "Observability error: {message}")
            }
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. }
            | Self::ServerError { source, .. }
            | Self::ObservabilityError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &dyn std::error::Error),
        }
    }
}

/// Convert from `eyre::Report` to `LoggerError`.
///
/// The server layer builds its errors with `eyre` context, so reports that
/// reach the CLI boundary are categorized as server errors.
impl From<eyre::Report> for LoggerError {
    fn from(err: eyre::Report) -> Self {
        Self::ServerError {
            message: format!("{err:#}"),
            source: None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        Self::ServerError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

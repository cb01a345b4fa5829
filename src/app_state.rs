//! Shared application state for the demo host.

use std::sync::Arc;
use std::time::SystemTime;

use crate::interceptor::{LogSink, RequestLoggingInterceptor, TracingSink};

/// Log sink shared by every request the host serves.
pub type SharedSink = Arc<dyn LogSink + Send + Sync>;

/// Shared application state for API handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Interceptor applied to every request.
    pub interceptor: RequestLoggingInterceptor<SharedSink>,
    /// Application start time for uptime tracking.
    pub start_time: SystemTime,
}

impl AppState {
    /// Create a new AppState logging through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create a new AppState logging to `sink`.
    #[must_use]
    pub fn with_sink(sink: SharedSink) -> Self {
        Self {
            interceptor: RequestLoggingInterceptor::new(sink),
            start_time: SystemTime::now(),
        }
    }

    /// Whole seconds since the state was created.
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or_default()
            .as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

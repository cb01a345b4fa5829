//! Logging ports the interceptor writes to.
//!
//! The interceptor never reaches for a global logger. It is handed a
//! [`LogSink`] at construction time:
//!
//! - [`TracingSink`] forwards every line to `tracing` at INFO level, which is
//!   what the binary and most hosts want.
//! - [`CaptureSink`] keeps the lines in memory so callers can assert on the
//!   exact output.

use std::sync::{Arc, Mutex, PoisonError};

/// Target used for lines emitted through [`TracingSink`].
pub const REQUEST_LOG_TARGET: &str = "http_request_logger::requests";

/// Destination for informational log lines.
///
/// Implementations must tolerate concurrent calls from many in-flight
/// requests.
pub trait LogSink {
    /// Append one informational line.
    fn info(&self, message: &str);
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }
}

/// Sink that emits each line as a `tracing` INFO event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: REQUEST_LOG_TARGET, "{message}");
    }
}

/// Sink that records lines in a shared in-memory buffer.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    /// Create an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line recorded so far, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every recorded line.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for CaptureSink {
    fn info(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink_records_in_order() {
        let sink = CaptureSink::new();
        assert!(sink.is_empty());

        sink.info("first");
        sink.info("second");

        assert_eq!(sink.lines(), vec!["first", "second"]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_capture_sink_clones_share_buffer() {
        let sink = CaptureSink::new();
        let clone = sink.clone();

        clone.info("from clone");
        assert_eq!(sink.lines(), vec!["from clone"]);

        sink.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_sink_through_arc_and_reference() {
        let sink = CaptureSink::new();
        let shared: Arc<dyn LogSink + Send + Sync> = Arc::new(sink.clone());

        shared.info("via arc");
        (&sink).info("via ref");

        assert_eq!(sink.lines(), vec!["via arc", "via ref"]);
    }

    #[test]
    fn test_capture_sink_concurrent_writes() {
        let sink = CaptureSink::new();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let sink = sink.clone();
                scope.spawn(move || {
                    for i in 0..50 {
                        sink.info(&format!("worker {worker} line {i}"));
                    }
                });
            }
        });

        assert_eq!(sink.len(), 400);
    }

    #[test]
    fn test_tracing_sink_emits_without_panicking() {
        crate::observability::init_test_tracing();
        TracingSink.info("Incoming GET request to http://host/health");
    }
}

//! Request/response logging interceptor.
//!
//! [`RequestLoggingInterceptor`] wraps one call to the next pipeline stage
//! and writes four lines to its [`LogSink`]:
//!
//! ```text
//! Incoming GET request to http://host/health
//! Request started at: 2024-05-01 09:30:12.123456
//! Request completed with status 200
//! Request duration: 0.010 seconds
//! ```
//!
//! The first two lines are written before the downstream stage runs. The last
//! two are written only when it succeeds: a failing stage leaves the error
//! untouched for the caller and adds no lines of its own.
//!
//! # Usage
//!
//! ```
//! use http_request_logger::interceptor::{CaptureSink, RequestLoggingInterceptor};
//! use axum::http::{Request, Response};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let sink = CaptureSink::new();
//! let interceptor = RequestLoggingInterceptor::new(sink.clone());
//!
//! let request = Request::get("/health").header("host", "host").body(()).unwrap();
//! let response = interceptor
//!     .intercept(request, |_req| async {
//!         Ok::<_, std::convert::Infallible>(Response::new(()))
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(response.status(), 200);
//! assert_eq!(sink.lines()[0], "Incoming GET request to http://host/health");
//! # }
//! ```

pub mod layer;
pub mod sink;
pub mod view;

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{info_span, Instrument, Span};

pub use layer::{RequestLogging, RequestLoggingLayer};
pub use sink::{CaptureSink, LogSink, TracingSink};
pub use view::{RequestView, ResponseView};

/// Timestamp layout used for the `Request started at` line.
pub const START_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One of the four lines the interceptor emits per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine<'a> {
    /// `Incoming {METHOD} request to {URL}`
    Incoming {
        /// Request method
        method: &'a str,
        /// Request target URL
        url: &'a str,
    },
    /// `Request started at: {timestamp}`
    Started(DateTime<Local>),
    /// `Request completed with status {STATUS}`
    Completed(u16),
    /// `Request duration: {seconds:.3} seconds`
    Duration(Duration),
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incoming { method, url } => write!(f, "Incoming {method} request to {url}"),
            Self::Started(at) => {
                write!(f, "Request started at: {}", at.format(START_TIMESTAMP_FORMAT))
            }
            Self::Completed(status) => write!(f, "Request completed with status {status}"),
            Self::Duration(elapsed) => {
                write!(f, "Request duration: {:.3} seconds", elapsed.as_secs_f64())
            }
        }
    }
}

/// Start-of-request bookkeeping carried across the downstream call.
struct InFlight {
    started: Instant,
    span: Span,
}

/// Logging decorator around a single downstream pipeline call.
///
/// Holds nothing but its sink, so one instance can serve any number of
/// concurrent requests. Per-request values live on the stack of each call.
#[derive(Debug, Clone, Default)]
pub struct RequestLoggingInterceptor<L = TracingSink> {
    sink: L,
}

impl<L: LogSink> RequestLoggingInterceptor<L> {
    /// Create an interceptor writing to `sink`.
    #[must_use]
    pub const fn new(sink: L) -> Self {
        Self { sink }
    }

    /// The sink lines are written to.
    #[must_use]
    pub const fn sink(&self) -> &L {
        &self.sink
    }

    /// Log around an asynchronous, fallible downstream stage.
    ///
    /// `next` is invoked exactly once with `request`. Its response is returned
    /// unchanged; its error is returned unchanged and suppresses the
    /// completion and duration lines.
    ///
    /// # Errors
    ///
    /// Returns whatever error `next` produced.
    pub async fn intercept<Req, Res, E, F, Fut>(&self, request: Req, next: F) -> Result<Res, E>
    where
        Req: RequestView,
        Res: ResponseView,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = Result<Res, E>>,
    {
        let in_flight = self.begin(&request);
        let span = in_flight.span.clone();

        let response = next(request).instrument(span).await?;

        self.finish(in_flight, &response);
        Ok(response)
    }

    /// Log around an asynchronous downstream stage that cannot fail, such as
    /// axum's `Next`.
    pub async fn intercept_infallible<Req, Res, F, Fut>(&self, request: Req, next: F) -> Res
    where
        Req: RequestView,
        Res: ResponseView,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = Res>,
    {
        let outcome = self
            .intercept(request, |req| async move { Ok::<_, Infallible>(next(req).await) })
            .await;

        match outcome {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// Log around a synchronous downstream stage.
    ///
    /// # Errors
    ///
    /// Returns whatever error `next` produced.
    pub fn intercept_blocking<Req, Res, E, F>(&self, request: Req, next: F) -> Result<Res, E>
    where
        Req: RequestView,
        Res: ResponseView,
        F: FnOnce(Req) -> Result<Res, E>,
    {
        let in_flight = self.begin(&request);

        let response = in_flight.span.in_scope(|| next(request))?;

        self.finish(in_flight, &response);
        Ok(response)
    }

    fn begin(&self, request: &impl RequestView) -> InFlight {
        let started_at = Local::now();
        let started = Instant::now();

        let method = request.method();
        let url = request.url();
        let span = info_span!("http_request", method = %method, url = %url);

        {
            let _entered = span.enter();
            self.sink.info(&LogLine::Incoming { method, url: &url }.to_string());
            self.sink.info(&LogLine::Started(started_at).to_string());
        }

        InFlight { started, span }
    }

    fn finish(&self, in_flight: InFlight, response: &impl ResponseView) {
        let elapsed = in_flight.started.elapsed();

        let _entered = in_flight.span.enter();
        self.sink
            .info(&LogLine::Completed(response.status()).to_string());
        self.sink.info(&LogLine::Duration(elapsed).to_string());
    }
}

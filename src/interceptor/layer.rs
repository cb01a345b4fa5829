//! Tower integration for [`RequestLoggingInterceptor`].
//!
//! [`RequestLoggingLayer`] wraps any `tower::Service` whose requests implement
//! [`RequestView`] and whose responses implement [`ResponseView`]. The wrapped
//! service keeps the inner service's response and error types, so it composes
//! with other layers in any order.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use http_request_logger::interceptor::RequestLoggingLayer;
//!
//! let app: Router = Router::new()
//!     .route("/health", get(|| async { "ok" }))
//!     .layer(RequestLoggingLayer::tracing());
//! ```

use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use super::{LogSink, RequestLoggingInterceptor, RequestView, ResponseView, TracingSink};

/// Layer that applies [`RequestLogging`] to a service.
#[derive(Debug, Clone, Default)]
pub struct RequestLoggingLayer<L = TracingSink> {
    interceptor: RequestLoggingInterceptor<L>,
}

impl RequestLoggingLayer<TracingSink> {
    /// Layer writing through `tracing`.
    #[must_use]
    pub const fn tracing() -> Self {
        Self::new(TracingSink)
    }
}

impl<L: LogSink> RequestLoggingLayer<L> {
    /// Layer writing to `sink`.
    #[must_use]
    pub const fn new(sink: L) -> Self {
        Self {
            interceptor: RequestLoggingInterceptor::new(sink),
        }
    }

    /// Layer reusing an existing interceptor.
    #[must_use]
    pub const fn from_interceptor(interceptor: RequestLoggingInterceptor<L>) -> Self {
        Self { interceptor }
    }
}

impl<S, L: Clone> Layer<S> for RequestLoggingLayer<L> {
    type Service = RequestLogging<S, L>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogging {
            inner,
            interceptor: self.interceptor.clone(),
        }
    }
}

/// Service produced by [`RequestLoggingLayer`].
#[derive(Debug, Clone)]
pub struct RequestLogging<S, L = TracingSink> {
    inner: S,
    interceptor: RequestLoggingInterceptor<L>,
}

impl<S, L> RequestLogging<S, L> {
    /// Borrow the wrapped service.
    pub const fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap into the inner service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, L, Req> Service<Req> for RequestLogging<S, L>
where
    S: Service<Req> + Clone + Send + 'static,
    S::Response: ResponseView + Send + 'static,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
    L: LogSink + Clone + Send + Sync + 'static,
    Req: RequestView + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Req) -> Self::Future {
        // The clone has not been driven to readiness; keep the ready one.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let interceptor = self.interceptor.clone();

        Box::pin(async move {
            interceptor
                .intercept(request, move |req| inner.call(req))
                .await
        })
    }
}

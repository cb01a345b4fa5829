//! Read-only views of the request and response the interceptor logs.

use axum::http::{header::HOST, Request, Response};

/// The parts of an inbound request the interceptor reads.
pub trait RequestView {
    /// HTTP method, e.g. `GET`.
    fn method(&self) -> &str;

    /// Target URL as the client addressed it.
    fn url(&self) -> String;
}

/// The parts of a downstream response the interceptor reads.
pub trait ResponseView {
    /// Numeric status code.
    fn status(&self) -> u16;
}

impl<B> RequestView for Request<B> {
    fn method(&self) -> &str {
        self.method().as_str()
    }

    /// Server-side requests usually carry only the origin form (`/path?query`),
    /// so the absolute URL is rebuilt from the `Host` header when one is sent.
    fn url(&self) -> String {
        let uri = self.uri();
        if uri.authority().is_some() {
            return uri.to_string();
        }

        let target = uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), ToString::to_string);

        match self.headers().get(HOST).and_then(|h| h.to_str().ok()) {
            Some(host) => format!("http://{host}{target}"),
            None => target,
        }
    }
}

impl<B> ResponseView for Response<B> {
    fn status(&self) -> u16 {
        self.status().as_u16()
    }
}

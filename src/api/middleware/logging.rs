//! Request logging middleware for axum's `from_fn_with_state`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Logs every request/response pair through the state's interceptor.
pub async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state
        .interceptor
        .intercept_infallible(request, |req| next.run(req))
        .await
}

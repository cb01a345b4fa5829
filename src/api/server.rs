//! Axum server setup and routing.

use axum::http::HeaderValue;
use axum::{middleware, routing::get, Router};
use eyre::WrapErr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::{handlers, middleware as api_middleware};
use crate::app_state::AppState;
use crate::config::Config;

/// Build the router with the logging middleware applied to every route,
/// including the fallback.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(build_cors_layer(cors_origins))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_middleware::logging::log_requests,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::not_found)
        .layer(middleware_stack)
        .with_state(state)
}

/// Run the Axum API server until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: &Config) -> eyre::Result<()> {
    let app = build_router(AppState::new(), config.cors_origins());
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "Starting API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated unexpectedly")?;

    info!("Shutdown complete");
    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new().allow_origin(allowed)
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

//! HTTP handlers for API endpoints.

use axum::{http::StatusCode, Json};

use crate::api::models::ErrorResponse;

pub mod health;

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "No route matches the request".to_string(),
        }),
    )
}

//! API route definitions.

use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use loanfx_shared::AppError;
use serde_json::json;
use tracing::debug;

use crate::AppState;

pub mod currencies;
pub mod exchange_rates;
pub mod health;
pub mod loans;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(loans::routes())
        .merge(currencies::routes())
        .merge(exchange_rates::routes())
}

/// Renders an error as `{"error": code, "message": text}` with its HTTP status.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code().to_ascii_lowercase(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Fallback for paths no route matches.
pub(crate) async fn not_found(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route for request");
    error_response(&AppError::NotFound(format!("No route for {}", uri.path())))
}

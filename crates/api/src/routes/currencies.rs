//! Currency listing routes.

use axum::{Json, Router, routing::get};
use loanfx_core::currency::known_currencies;
use serde_json::{Value, json};

use crate::AppState;

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies", get(list_currencies))
}

/// GET `/currencies` - List the built-in currency metadata.
async fn list_currencies() -> Json<Value> {
    Json(json!({ "currencies": known_currencies() }))
}

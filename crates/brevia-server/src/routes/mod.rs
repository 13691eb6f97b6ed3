//! HTTP route handlers.

pub mod extract;
pub mod summarize;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::error;

use brevia_core::Error;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(extract::routes())
        .merge(summarize::routes())
}

/// Render an error as a structured JSON response.
///
/// Internal failures are logged and surfaced as a generic message; every
/// other category carries its message verbatim for the caller.
pub(crate) fn error_response(error: &Error) -> Response {
    let status = if error.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        match error {
            Error::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidCredential => StatusCode::UNAUTHORIZED,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Internal error: {}", error);
        "An unexpected error occurred.".to_string()
    } else {
        error.to_string()
    };

    (
        status,
        Json(serde_json::json!({
            "error": message,
            "category": error.category(),
        })),
    )
        .into_response()
}

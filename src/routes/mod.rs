//! HTTP route definitions and handlers.
//!
//! Routes are grouped into todo CRUD, attachment upload URLs and health checks.
//! Every response passes through the CORS middleware.

mod attachment_routes;
pub mod cors;
mod health_routes;
mod todo_routes;

use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;
use axum::http::StatusCode;
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(todo_routes::routes())
        .merge(attachment_routes::routes())
        .merge(health_routes::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> HTTPError {
    HTTPError::new(StatusCode::NOT_FOUND, "No such route", None)
}

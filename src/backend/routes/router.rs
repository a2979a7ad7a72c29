/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * From the outside in:
 * 1. `TraceLayer` - one span per request
 * 2. `auth_middleware` - resolves the bearer token to an `Actor`
 * 3. API routes under `/api/v1`, then a JSON 404 fallback
 */

use axum::{http::StatusCode, middleware, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Prefix of every API route
pub const API_PREFIX: &str = "/api/v1";

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = configure_api_routes(Router::new());

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "route not found")
}

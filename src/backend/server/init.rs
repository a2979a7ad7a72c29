/**
 * Server Initialization
 *
 * This module assembles the Axum application from the configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Build the shared `AppState`
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Validated application configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing blogforge backend server");

    let db = load_database(&config).await?;
    let app_state = AppState::new(db, config);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}

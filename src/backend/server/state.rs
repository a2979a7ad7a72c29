/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the only shared state of the server. It holds
 * the database pool and the configuration. No content state lives in the
 * process: every request reads and writes through the pool.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract the pool or
 * the configuration without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // Run queries against the pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db` - SQLite connection pool
/// * `config` - Immutable application configuration
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration (token secret, bcrypt cost, limits)
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly using
/// `State(SqlitePool)`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Implement FromRef for the configuration
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

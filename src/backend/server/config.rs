/**
 * Server Configuration
 *
 * This module opens the SQLite database described by the application
 * configuration and brings its schema up to date.
 *
 * # Error Handling
 *
 * Unlike optional services, the database is required: connection and
 * migration failures are returned to the caller and abort startup.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::shared::AppConfig;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Parses `config.database_url`
/// 2. Creates the database file if missing, enables foreign keys and
///    switches to WAL with a busy timeout so writers queue instead of failing
/// 3. Creates a pool of `config.max_connections` connections
/// 4. Runs the embedded migrations
///
/// # Errors
///
/// Returns the sqlx error when the URL is invalid, the database cannot be
/// opened or a migration fails.
pub async fn load_database(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations to `pool`
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

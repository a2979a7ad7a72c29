//! Database test fixtures
//!
//! Every test gets its own SQLite database with the migrations applied.
//! The default fixture is in memory; its pool holds exactly one connection
//! that never expires, since each new connection to `sqlite::memory:` would
//! open an empty database. Tests that race writers use
//! [`TestDatabase::file_backed`], which opens the server's pool over a
//! temporary file.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use blogforge::backend::server::config::{load_database, run_migrations};
use blogforge::backend::server::state::AppState;
use blogforge::shared::AppConfig;

/// Secret used to sign test tokens
pub const TEST_JWT_SECRET: &str = "test-secret";

/// Configuration for tests: cheap bcrypt, fixed secret
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        bcrypt_cost: 4,
        ..AppConfig::default()
    }
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
    _dir: Option<TempDir>,
}

impl TestDatabase {
    /// Create a fresh, migrated in-memory database
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("Invalid SQLite URL")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .expect("Failed to create test database pool");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, _dir: None }
    }

    /// Create a fresh, migrated database file with a multi-connection pool,
    /// configured the way the server configures its own
    pub async fn file_backed() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = AppConfig {
            database_url: format!("sqlite://{}", dir.path().join("blog.db").display()),
            max_connections: 8,
            ..test_config()
        };

        let pool = load_database(&config)
            .await
            .expect("Failed to open file-backed test database");

        Self {
            pool,
            _dir: Some(dir),
        }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Application state over this database
    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone(), test_config())
    }
}

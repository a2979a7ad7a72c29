//! Application configuration module
//!
//! Provides the configuration consumed by the server: database location,
//! listen address, token signing parameters, password hashing cost and
//! logging filter. Values come either from [`AppConfig::builder`] or from
//! the process environment through [`AppConfig::from_env`].

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Default SQLite database location (created when missing)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://blogforge.db?mode=rwc";

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEV_JWT_SECRET: &str = "blogforge-development-secret";

/// Matches `bcrypt::DEFAULT_COST`
pub const DEFAULT_BCRYPT_COST: u32 = 12;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx connection URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// HS256 secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub token_ttl_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Pool size
    pub max_connections: u32,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Default size of the hot posts list
    pub hot_posts_limit: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            max_connections: 5,
            log_filter: "info".to_string(),
            hot_posts_limit: 5,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build the configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults. `APP_BIND_ADDR` wins over
    /// `APP_PORT`; the latter binds every interface on the given port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }

        if let Ok(addr) = env::var("APP_BIND_ADDR") {
            builder = builder.bind_addr(addr);
        } else if let Ok(port) = env::var("APP_PORT") {
            let port: u16 = parse_var("APP_PORT", &port)?;
            builder = builder.bind_addr(format!("0.0.0.0:{}", port));
        }

        match env::var("JWT_SECRET") {
            Ok(secret) => builder = builder.jwt_secret(secret),
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
            }
        }

        if let Ok(ttl) = env::var("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl_hours(parse_var("TOKEN_TTL_HOURS", &ttl)?);
        }
        if let Ok(cost) = env::var("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", &cost)?);
        }
        if let Ok(max) = env::var("DB_MAX_CONNECTIONS") {
            builder = builder.max_connections(parse_var("DB_MAX_CONNECTIONS", &max)?);
        }
        if let Ok(filter) = env::var("RUST_LOG") {
            builder = builder.log_filter(filter);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("database_url"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if self.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidAddress(self.bind_addr.clone()));
        }
        if self.token_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "token_ttl_hours",
                value: self.token_ttl_hours.to_string(),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "bcrypt_cost",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_connections",
                value: "0".to_string(),
            });
        }
        if self.hot_posts_limit <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "hot_posts_limit",
                value: self.hot_posts_limit.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    bind_addr: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<i64>,
    bcrypt_cost: Option<u32>,
    max_connections: Option<u32>,
    log_filter: Option<String>,
    hot_posts_limit: Option<i64>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn hot_posts_limit(mut self, limit: i64) -> Self {
        self.hot_posts_limit = Some(limit);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            bind_addr: self.bind_addr.unwrap_or(defaults.bind_addr),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_hours: self.token_ttl_hours.unwrap_or(defaults.token_ttl_hours),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            hot_posts_limit: self.hot_posts_limit.unwrap_or(defaults.hot_posts_limit),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid bind address: {0}")]
    InvalidAddress(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

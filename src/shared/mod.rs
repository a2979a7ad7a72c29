//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and API clients. Everything here is serde-serializable and free
//! of database or HTTP dependencies.
//!
//! # Overview
//!
//! - `blog` - users, posts, tags, comments, notifications, search results
//! - `error` - validation and serialization errors
//! - `config` - application configuration

/// Blog domain types
pub mod blog;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use blog::{Actor, Post, PostStatus, Role, SortKey};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;

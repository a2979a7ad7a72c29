//! Backend Module
//!
//! This module contains all server-side code for blogforge: the Axum HTTP
//! server, the SQLite persistence layer and the content ranking and
//! social-graph engine built on it.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, database
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Bearer token resolution to an `Actor`
//! - **`auth`** - Registration, login, JWT tokens
//! - **`graph`** - Generic edge sets (follow, like, favorite, post tags)
//! - **`tags`** - Find-or-create tag resolution and tag listings
//! - **`posts`** - Post persistence, feed ranking, engagement counters
//! - **`comments`** - Comment threads, creation and soft deletion
//! - **`notifications`** - Fan-out from new comments, read state
//! - **`social`** - Follow graph, profiles
//! - **`search`** - Global keyword search
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── query.rs        - write transactions, case folding, LIKE escaping, row mapping
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! ├── auth/           - Authentication
//! ├── graph/          - Relationship store
//! ├── tags/           - Tag resolver
//! ├── posts/          - Posts, feed, counters
//! ├── comments/       - Comment threads
//! ├── notifications/  - Notification fan-out
//! ├── social/         - Follows and profiles
//! ├── search/         - Global search
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds only the database pool and the configuration. Every
//! core operation receives the pool explicitly; all shared mutable state
//! lives in the database.
//!
//! # Error Handling
//!
//! Core operations return `BackendResult<T>`. `BackendError` maps each
//! error kind to an HTTP status and renders a JSON body, so handlers
//! propagate with `?`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Query helpers shared by the persistence modules
pub mod query;

/// Relationship store
pub mod graph;

/// Tag resolution and listings
pub mod tags;

/// Posts, feed ranking and counters
pub mod posts;

/// Comment threads
pub mod comments;

/// Notifications
pub mod notifications;

/// Follow graph and profiles
pub mod social;

/// Global search
pub mod search;

/// Re-export commonly used types
pub use error::{BackendError, BackendResult};
pub use server::{create_app, AppState};

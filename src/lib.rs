//! blogforge - Main Library
//!
//! blogforge is a blogging platform backend built with Rust: posts, tags,
//! threaded comments, follows, likes, favorites and notifications behind a
//! JSON REST API.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by the backend and API clients
//!   - Users, posts, tags, comments, notifications, search results
//!   - Request validation errors
//!   - Application configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and authentication middleware
//!   - SQLite persistence through sqlx
//!   - Feed ranking, relationship store, comment threads, notification fan-out
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use blogforge::backend::server::create_app;
//! use blogforge::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::default()).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation and serialization failures
//! - `backend::BackendError` for everything the server reports, mapped to
//!   HTTP status codes

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

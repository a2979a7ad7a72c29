//! Middleware Module
//!
//! This module contains the HTTP middleware of the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Resolves the request actor from the session token
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use blogforge::backend::middleware::auth_middleware;
//!
//! let router = router.layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, MaybeUser};

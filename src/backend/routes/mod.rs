//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! - **`router`** - Main router creation, layers and fallback
//! - **`api_routes`** - REST endpoints under `/api/v1`

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::{create_router, API_PREFIX};

//! Backend Error Module
//!
//! This module defines the error type shared by the core operations and the
//! HTTP handlers, and its conversion to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse` from Axum, so handlers return
//! `Result<_, BackendError>` directly. The error is converted to the matching
//! status code and a JSON body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{is_unique_violation, BackendError};

/// Result alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

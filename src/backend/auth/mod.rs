//! Authentication Module
//!
//! This module handles user registration, login and session tokens. The
//! rest of the backend only ever sees the resulting `Actor`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User rows and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email and password → user created → JWT token returned
//! 2. **Login**: username (or email) and password → credentials verified → JWT token returned
//! 3. **Me**: JWT token → actor resolved by the middleware → user info returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens carry the user id and role and expire after the configured TTL
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use handlers::{get_me, login, signup};

/**
 * Backend Error Types
 *
 * This module defines the error type returned by every core operation and
 * HTTP handler of the backend.
 *
 * # Error Categories
 *
 * ## Domain Errors
 *
 * Raised by the content and social-graph operations:
 * - `NotFound` - a referenced user, post, tag, comment or notification is absent
 * - `Forbidden` - the actor lacks authority for a mutating action
 * - `InvalidReference` - a comment's parent/reply target does not belong to the post
 * - `Conflict` - self-follow, duplicate username or email
 *
 * ## Request Errors
 *
 * - `Unauthorized` - missing or invalid session token, bad credentials
 * - `HandlerError` - malformed request with an explicit status
 * - `SharedError` - request body validation failures
 *
 * ## Infrastructure Errors
 *
 * - `Database`, `Token`, `PasswordHash` - failures of the collaborators
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use blogforge::backend::error::BackendError;
///
/// let err = BackendError::not_found("post", 42);
/// let err = BackendError::forbidden("only the author may edit this post");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"post"`
        entity: &'static str,
        /// Identity that was looked up
        id: i64,
    },

    /// Actor is not allowed to perform the action
    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
    },

    /// A comment reference does not belong to the stated post
    #[error("Invalid reference: {message}")]
    InvalidReference {
        message: String,
    },

    /// The write would violate a uniqueness or graph rule
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Authentication required or failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// Handler error (e.g., malformed path or query)
    ///
    /// This error occurs when processing HTTP requests fails due to
    /// invalid input that is not covered by body validation.
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from shared module)
    ///
    /// This error wraps validation errors of request bodies.
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session token could not be issued or verified
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing failure
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Create a not-found error for `entity` with identity `id`
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    ///
    /// # Example
    ///
    /// ```rust
    /// use blogforge::backend::error::BackendError;
    /// use axum::http::StatusCode;
    ///
    /// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
    /// ```
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Forbidden` - 403
    /// - `InvalidReference` - 400
    /// - `Conflict` - 409
    /// - `Unauthorized`, `Token` - 401
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400
    /// - `Database`, `PasswordHash` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message shown to clients
    ///
    /// Infrastructure failures are not described beyond their category.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            Self::Forbidden { message }
            | Self::InvalidReference { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message } => message.clone(),
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Token(_) => "Invalid or expired token".to_string(),
            Self::PasswordHash(_) => "Internal server error".to_string(),
        }
    }
}

/// True when `err` is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/v1/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown users and wrong passwords produce the same 401 response
 * - User passwords are never returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_email, get_user_by_username};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const BAD_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// Looks the user up by email when the identifier contains `@`, by username
/// otherwise.
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let user = if request.username.contains('@') {
        get_user_by_email(&state.db, &request.username).await?
    } else {
        get_user_by_username(&state.db, &request.username).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("User not found: {}", request.username);
        BackendError::unauthorized(BAD_CREDENTIALS)
    })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    let token = create_token(
        user.id,
        user.role(),
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.to_user(),
    }))
}

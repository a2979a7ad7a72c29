/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/v1/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password
 * 2. Check if the username or email is taken
 * 3. Hash password using bcrypt at the configured cost
 * 4. Create user in database
 * 5. Generate JWT token
 * 6. Return token and user info
 */

use axum::{extract::State, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If username, email or password is invalid
/// * `409 Conflict` - If the username or email is already registered
/// * `500 Internal Server Error` - If hashing, user creation, or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/v1/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Signup request for username: {}", request.username);

    request.validate().map_err(|e| {
        tracing::warn!("Rejected signup: {}", e);
        e
    })?;

    if get_user_by_username(&state.db, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }
    if get_user_by_email(&state.db, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    // A concurrent signup can still win the race between the checks and the insert.
    let user = create_user(&state.db, &request.username, &request.email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::conflict("Username or email already registered")
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                BackendError::from(e)
            }
        })?;

    let token = create_token(
        user.id,
        user.role(),
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok(Json(AuthResponse {
        token,
        user: user.to_user(),
    }))
}

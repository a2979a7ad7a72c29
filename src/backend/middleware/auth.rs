/**
 * Authentication Middleware
 *
 * This module resolves the request's actor from the `Authorization` header.
 * Requests without the header pass through anonymously; requests with a
 * header must carry a valid token for an existing user. Handlers read the
 * result through the `AuthUser` and `MaybeUser` extractors.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::blog::Actor;

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header, if any
/// 2. Verifies the token
/// 3. Re-reads the user's role from the database
/// 4. Attaches the `Actor` to request extensions for use in handlers
///
/// Returns 401 Unauthorized if a header is present but malformed, the token
/// is invalid or the user no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = match request.headers().get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| {
            tracing::warn!("Non-ASCII Authorization header");
            BackendError::unauthorized("Invalid Authorization header")
        })?,
        None => return Ok(next.run(request).await),
    };

    // Extract token (format: "Bearer <token>")
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid Authorization header")
    })?;

    let claims = verify_token(token, &app_state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user = get_user_by_id(&app_state.db, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown user {}", user_id);
            BackendError::unauthorized("Invalid or expired token")
        })?;

    request
        .extensions_mut()
        .insert(Actor::new(user.id, user.role()));

    Ok(next.run(request).await)
}

/// Axum extractor for an authenticated actor
///
/// Rejects with 401 when the request is anonymous.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub Actor);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts.extensions.get::<Actor>().copied().ok_or_else(|| {
            tracing::debug!("Anonymous request to an authenticated route");
            BackendError::unauthorized("Authentication required")
        })?;

        Ok(AuthUser(actor))
    }
}

/// Axum extractor for an optional actor
#[derive(Clone, Copy, Debug)]
pub struct MaybeUser(pub Option<Actor>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<Actor>().copied()))
    }
}

/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/v1/me, which returns
 * information about the currently authenticated user.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::blog::User;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the request is anonymous
/// * `404 Not Found` - If the user was removed after the token was checked
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<User>, BackendError> {
    let user = get_user_by_id(&state.db, actor.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user", actor.user_id))?;

    Ok(Json(user.to_user()))
}

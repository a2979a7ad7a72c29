//! Social HTTP Handlers
//!
//! Follow graph, public profiles and profile updates.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{follow, profile};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, MaybeUser};
use crate::backend::server::state::AppState;
use crate::shared::blog::{ToggleResponse, UpdateProfileRequest, User, UserProfile, UserSummary};

pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = follow::follow(&state.db, actor.user_id, user_id).await?;
    Ok(Json(ToggleResponse { active }))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = follow::unfollow(&state.db, actor.user_id, user_id).await?;
    Ok(Json(ToggleResponse { active }))
}

pub async fn followers(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    Ok(Json(follow::list_followers(&state.db, user_id).await?))
}

pub async fn following(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    Ok(Json(follow::list_following(&state.db, user_id).await?))
}

pub async fn get_profile(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserProfile>, BackendError> {
    let viewer = actor.map(|a| a.user_id);
    Ok(Json(profile::get_profile(&state.db, user_id, viewer).await?))
}

/// Update the caller's own email and avatar
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>, BackendError> {
    request.validate()?;
    Ok(Json(
        profile::update_profile(&state.db, actor.user_id, &request).await?,
    ))
}

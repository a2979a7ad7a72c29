//! Notification HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::blog::{MarkAllReadResponse, Notification, UnreadCount};

pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<Notification>>, BackendError> {
    let notifications = db::list_notifications(&state.db, actor.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            e
        })?;
    Ok(Json(notifications))
}

pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<UnreadCount>, BackendError> {
    let count = db::unread_count(&state.db, actor.user_id).await?;
    Ok(Json(UnreadCount { count }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    db::mark_read(&state.db, actor.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<MarkAllReadResponse>, BackendError> {
    let updated = db::mark_all_read(&state.db, actor.user_id).await?;
    tracing::debug!("Marked {} notifications read for user {}", updated, actor.user_id);
    Ok(Json(MarkAllReadResponse { updated }))
}

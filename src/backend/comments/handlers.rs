//! Comment HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::blog::{Comment, CommentNode, CreateCommentRequest, UserComment};

/// Comment thread of a post
pub async fn get_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentNode>>, BackendError> {
    Ok(Json(db::get_thread(&state.db, post_id).await?))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    request.validate()?;
    let comment = db::create_comment(&state.db, actor, &request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    db::delete_comment(&state.db, actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Comments written by the caller
pub async fn my_comments(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<UserComment>>, BackendError> {
    let comments = db::list_comments_by_user(&state.db, actor.user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list comments of user {}: {:?}", actor.user_id, e);
            e
        })?;
    Ok(Json(comments))
}

/// Comments left on the caller's posts
pub async fn comments_on_my_posts(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Vec<UserComment>>, BackendError> {
    Ok(Json(
        db::list_comments_on_user_posts(&state.db, actor.user_id).await?,
    ))
}

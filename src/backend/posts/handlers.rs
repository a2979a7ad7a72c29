//! Post HTTP Handlers
//!
//! Feed listings, post CRUD, pins and like/favorite toggles.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{counters, db, feed};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, MaybeUser};
use crate::backend::server::state::AppState;
use crate::shared::blog::{
    CreatePostRequest, Engagement, Post, PostPage, SortKey, ToggleResponse, UpdatePostRequest,
};

/// Largest accepted page size
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp `page` to >= 1 and `page_size` to 1..=[`MAX_PAGE_SIZE`]
pub fn page_params(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

/// Treat blank query values as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Query parameters of `GET /posts`
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub tag: Option<String>,
    pub user_id: Option<i64>,
    pub status: Option<String>,
    pub order_by: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HotParams {
    pub limit: Option<i64>,
}

/// List the feed
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostPage>, BackendError> {
    let (page, page_size) = page_params(params.page, params.page_size, 10);
    let author_id = params.user_id.filter(|id| *id > 0);
    let status = feed::resolve_status_filter(params.status.as_deref(), actor, author_id)?;
    let sort = params
        .order_by
        .as_deref()
        .and_then(SortKey::from_str)
        .unwrap_or_default();

    let query = feed::FeedQuery {
        page,
        page_size,
        tag: non_blank(params.tag),
        author_id,
        status,
        sort,
        keyword: non_blank(params.keyword),
    };

    let result = feed::list_posts(&state.db, &query).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        e
    })?;
    Ok(Json(result))
}

/// Most liked published posts
pub async fn hot_posts(
    State(state): State<AppState>,
    Query(params): Query<HotParams>,
) -> Result<Json<Vec<Post>>, BackendError> {
    let limit = params
        .limit
        .unwrap_or(state.config.hot_posts_limit)
        .clamp(1, MAX_PAGE_SIZE);
    Ok(Json(feed::get_hot_posts(&state.db, limit).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), BackendError> {
    request.validate()?;
    let post = db::create_post(&state.db, actor, &request).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Post detail; counts one view
pub async fn get_post(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<Post>, BackendError> {
    Ok(Json(feed::get_post_detail(&state.db, id, actor).await?))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<Post>, BackendError> {
    request.validate()?;
    Ok(Json(db::update_post(&state.db, actor, id, &request).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, BackendError> {
    db::delete_post(&state.db, actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = counters::toggle_like(&state.db, actor.user_id, id).await?;
    Ok(Json(ToggleResponse { active }))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = counters::toggle_favorite(&state.db, actor.user_id, id).await?;
    Ok(Json(ToggleResponse { active }))
}

/// Like/favorite counts, and the caller's own state when authenticated
pub async fn get_engagement(
    State(state): State<AppState>,
    MaybeUser(actor): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Json<Engagement>, BackendError> {
    let viewer = actor.map(|a| a.user_id);
    Ok(Json(counters::engagement(&state.db, id, viewer).await?))
}

pub async fn toggle_top(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = db::toggle_personal_top(&state.db, actor, id).await?;
    Ok(Json(ToggleResponse { active }))
}

pub async fn toggle_system_top(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ToggleResponse>, BackendError> {
    let active = db::toggle_site_top(&state.db, actor, id).await?;
    Ok(Json(ToggleResponse { active }))
}

/// Published posts of one user
pub async fn user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Json<PostPage>, BackendError> {
    let (page, page_size) = page_params(params.page, params.page_size, 20);
    Ok(Json(
        feed::list_user_posts(&state.db, user_id, page, page_size).await?,
    ))
}

pub async fn liked_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::list_liked_posts(&state.db, user_id).await?))
}

pub async fn favorite_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Post>>, BackendError> {
    Ok(Json(db::list_favorite_posts(&state.db, user_id).await?))
}

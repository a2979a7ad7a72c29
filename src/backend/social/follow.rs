//! Follow graph
//!
//! Thin wrappers over the `Follow` edge set that speak in user summaries.

use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_summaries;
use crate::backend::error::BackendResult;
use crate::backend::graph::{self, Direction, Relation};
use crate::backend::posts::db::ensure_user;
use crate::shared::blog::UserSummary;

/// Make `follower` follow `followed`. Following twice is a no-op.
///
/// # Returns
///
/// The resulting state, always `true`.
///
/// # Errors
///
/// * `Conflict` - `follower == followed`
/// * `NotFound` - either user does not exist
pub async fn follow(pool: &SqlitePool, follower: i64, followed: i64) -> BackendResult<bool> {
    let mut conn = pool.acquire().await?;
    if graph::add_edge(&mut conn, Relation::Follow, follower, followed).await? {
        tracing::info!("User {} followed user {}", follower, followed);
    }
    Ok(true)
}

/// Remove the follow edge, if any.
///
/// # Returns
///
/// The resulting state, always `false`.
pub async fn unfollow(pool: &SqlitePool, follower: i64, followed: i64) -> BackendResult<bool> {
    let mut conn = pool.acquire().await?;
    if graph::remove_edge(&mut conn, Relation::Follow, follower, followed).await? {
        tracing::info!("User {} unfollowed user {}", follower, followed);
    }
    Ok(false)
}

/// Users following `user_id`, most recent first
pub async fn list_followers(pool: &SqlitePool, user_id: i64) -> BackendResult<Vec<UserSummary>> {
    related_users(pool, user_id, Direction::Incoming).await
}

/// Users `user_id` follows, most recent first
pub async fn list_following(pool: &SqlitePool, user_id: i64) -> BackendResult<Vec<UserSummary>> {
    related_users(pool, user_id, Direction::Outgoing).await
}

async fn related_users(
    pool: &SqlitePool,
    user_id: i64,
    direction: Direction,
) -> BackendResult<Vec<UserSummary>> {
    ensure_user(pool, user_id).await?;
    let ids = {
        let mut conn = pool.acquire().await?;
        graph::list_related(&mut conn, Relation::Follow, user_id, direction).await?
    };
    Ok(get_user_summaries(pool, &ids).await?)
}

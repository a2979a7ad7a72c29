//! Public profiles, profile updates and user search

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::graph::{self, Direction, Relation};
use crate::backend::query::{like_pattern, user_summary_from_row};
use crate::shared::blog::{PostStatus, UpdateProfileRequest, User, UserProfile, UserSummary};

/// Profile of `user_id` as seen by `viewer`.
///
/// Counts are computed on every call.
///
/// # Errors
///
/// * `NotFound` - the user does not exist
pub async fn get_profile(
    pool: &SqlitePool,
    user_id: i64,
    viewer: Option<i64>,
) -> BackendResult<UserProfile> {
    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user", user_id))?;

    let post_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE user_id = ? AND status = ?")
            .bind(user_id)
            .bind(PostStatus::Published.as_str())
            .fetch_one(pool)
            .await?;
    let mut conn = pool.acquire().await?;
    let follower_count =
        graph::count_edges(&mut conn, Relation::Follow, user_id, Direction::Incoming).await?;
    let following_count =
        graph::count_edges(&mut conn, Relation::Follow, user_id, Direction::Outgoing).await?;
    let is_following = match viewer {
        Some(viewer) if viewer != user_id => {
            graph::has_edge(&mut conn, Relation::Follow, viewer, user_id).await?
        }
        _ => false,
    };
    drop(conn);

    Ok(UserProfile {
        id: user.id,
        username: user.username.clone(),
        avatar: user.avatar.clone(),
        role: user.role(),
        created_at: user.created_at,
        post_count,
        follower_count,
        following_count,
        is_following,
    })
}

/// Change the email and, when given, the avatar of `user_id`.
///
/// # Errors
///
/// * `Conflict` - the email belongs to another account
/// * `NotFound` - the user does not exist
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: i64,
    request: &UpdateProfileRequest,
) -> BackendResult<User> {
    let result = sqlx::query(
        "UPDATE users SET email = ?, avatar = COALESCE(?, avatar), updated_at = ? WHERE id = ?",
    )
    .bind(&request.email)
    .bind(request.avatar.as_deref())
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::conflict("email is already registered")
        } else {
            BackendError::from(e)
        }
    })?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("user", user_id));
    }

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("user", user_id))?;
    tracing::info!("User {} updated their profile", user_id);
    Ok(user.to_user())
}

/// Users whose username contains `keyword`, ignoring case
pub async fn search_users(
    pool: &SqlitePool,
    keyword: &str,
    limit: i64,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, username, avatar
        FROM users
        WHERE username_folded LIKE ? ESCAPE '\'
        ORDER BY username ASC
        LIMIT ?
        "#,
    )
    .bind(like_pattern(keyword))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| user_summary_from_row(row, ""))
        .collect()
}


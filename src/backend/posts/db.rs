//! Database operations for posts
//!
//! Creation, update, deletion and pin flags, plus the row mapping shared by
//! every post listing.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};

use super::counters::POST_COUNTERS;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::graph::{self, Direction, Relation};
use crate::backend::query::{begin_write, fold_case, user_summary_from_row};
use crate::backend::tags::{db::tags_for_posts, resolver::replace_post_tags};
use crate::shared::blog::{Actor, CreatePostRequest, Post, PostStatus, UpdatePostRequest};

const POST_COLUMNS: &str = "\
    p.id, p.title, p.content, p.status, p.personal_top, p.site_top, p.view_count, \
    p.created_at, p.updated_at, \
    u.id AS author_id, u.username AS author_username, u.avatar AS author_avatar";

/// `SELECT ... FROM posts p JOIN users u` with the live counters; callers
/// append `WHERE`/`ORDER BY` clauses
pub(crate) fn post_select() -> String {
    format!(
        "SELECT {}, {} FROM posts p JOIN users u ON u.id = p.user_id",
        POST_COLUMNS, POST_COUNTERS
    )
}

/// Map a row produced by [`post_select`]. Tags are left empty.
pub(crate) fn post_from_row(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = PostStatus::from_str(&status).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: format!("unknown post status '{}'", status).into(),
    })?;
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author: user_summary_from_row(row, "author_")?,
        status,
        personal_top: row.try_get("personal_top")?,
        site_top: row.try_get("site_top")?,
        view_count: row.try_get("view_count")?,
        like_count: row.try_get("like_count")?,
        favorite_count: row.try_get("favorite_count")?,
        comment_count: row.try_get("comment_count")?,
        tags: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Fill in the tags of each post with one query
pub(crate) async fn attach_tags(pool: &SqlitePool, posts: &mut [Post]) -> Result<(), sqlx::Error> {
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let mut tags = tags_for_posts(pool, &ids).await?;
    for post in posts.iter_mut() {
        post.tags = tags.remove(&post.id).unwrap_or_default();
    }
    Ok(())
}

/// Get a post with author, counters and tags
pub async fn fetch_post(pool: &SqlitePool, id: i64) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("{} WHERE p.id = ?", post_select());
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    let mut posts = match row {
        Some(row) => vec![post_from_row(&row)?],
        None => return Ok(None),
    };
    attach_tags(pool, &mut posts).await?;
    Ok(posts.pop())
}

/// Posts with the given ids, in the order of `ids`.
///
/// Missing posts are skipped; with `published_only` hidden posts are too.
pub async fn fetch_posts_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
    published_only: bool,
) -> Result<Vec<Post>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(post_select());
    builder.push(" WHERE p.id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    if published_only {
        builder.push(" AND p.status = ");
        builder.push_bind(PostStatus::Published.as_str());
    }

    let rows = builder.build().fetch_all(pool).await?;
    let mut by_id = HashMap::with_capacity(rows.len());
    for row in &rows {
        let post = post_from_row(row)?;
        by_id.insert(post.id, post);
    }

    let mut posts: Vec<Post> = ids.iter().filter_map(|id| by_id.remove(id)).collect();
    attach_tags(pool, &mut posts).await?;
    Ok(posts)
}

/// Author of a post, or `None` when the post does not exist
async fn post_author(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM posts WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
}

/// Load the author and check that `actor` may manage the post.
///
/// Run it on the transaction that performs the change.
async fn authorize(
    conn: &mut SqliteConnection,
    actor: Actor,
    id: i64,
    action: &str,
) -> BackendResult<()> {
    let author_id = post_author(conn, id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", id))?;

    if !actor.can_manage(author_id) {
        tracing::warn!("User {} may not {} post {}", actor.user_id, action, id);
        return Err(BackendError::forbidden(format!(
            "only the author or an admin may {} this post",
            action
        )));
    }
    Ok(())
}

/// Create a post owned by `actor` together with its tags
pub async fn create_post(
    pool: &SqlitePool,
    actor: Actor,
    request: &CreatePostRequest,
) -> BackendResult<Post> {
    let now = Utc::now();
    let status = request.status.unwrap_or_default();

    let mut tx = begin_write(pool).await?;
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO posts (title, title_folded, content, user_id, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&request.title)
    .bind(fold_case(&request.title))
    .bind(&request.content)
    .bind(actor.user_id)
    .bind(status.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    replace_post_tags(&mut tx, id, &request.tags).await?;
    tx.commit().await?;

    tracing::info!("User {} created post {}", actor.user_id, id);
    fetch_post(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", id))
}

/// Update title, content and optionally status and tags.
///
/// The author check and the write share one transaction.
///
/// # Errors
///
/// * `NotFound` - the post does not exist
/// * `Forbidden` - the actor is neither the author nor an admin
pub async fn update_post(
    pool: &SqlitePool,
    actor: Actor,
    id: i64,
    request: &UpdatePostRequest,
) -> BackendResult<Post> {
    let mut tx = begin_write(pool).await?;
    authorize(&mut tx, actor, id, "edit").await?;

    sqlx::query(
        r#"
        UPDATE posts
        SET title = ?, title_folded = ?, content = ?, status = COALESCE(?, status), updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&request.title)
    .bind(fold_case(&request.title))
    .bind(&request.content)
    .bind(request.status.map(|s| s.as_str()))
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(tags) = &request.tags {
        replace_post_tags(&mut tx, id, tags).await?;
    }
    tx.commit().await?;

    tracing::info!("User {} updated post {}", actor.user_id, id);
    fetch_post(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", id))
}

/// Delete a post. Its edges, comments and notifications go with it.
///
/// # Errors
///
/// * `NotFound` - the post does not exist
/// * `Forbidden` - the actor is neither the author nor an admin
pub async fn delete_post(pool: &SqlitePool, actor: Actor, id: i64) -> BackendResult<()> {
    let mut tx = begin_write(pool).await?;
    authorize(&mut tx, actor, id, "delete").await?;

    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!("User {} deleted post {}", actor.user_id, id);
    Ok(())
}

/// Flip the author-scoped pin.
///
/// # Returns
///
/// The new value of `personal_top`.
pub async fn toggle_personal_top(pool: &SqlitePool, actor: Actor, id: i64) -> BackendResult<bool> {
    let mut tx = begin_write(pool).await?;
    authorize(&mut tx, actor, id, "pin").await?;
    let value = flip_flag(&mut tx, id, "personal_top").await?;
    tx.commit().await?;
    Ok(value)
}

/// Flip the site-wide pin. Admins only; the role is checked first.
///
/// # Returns
///
/// The new value of `site_top`.
pub async fn toggle_site_top(pool: &SqlitePool, actor: Actor, id: i64) -> BackendResult<bool> {
    if !actor.is_admin() {
        tracing::warn!("Non-admin user {} tried to pin post {} site-wide", actor.user_id, id);
        return Err(BackendError::forbidden("only an admin may pin posts site-wide"));
    }
    let mut conn = pool.acquire().await?;
    flip_flag(&mut conn, id, "site_top").await
}

async fn flip_flag(
    conn: &mut SqliteConnection,
    id: i64,
    column: &'static str,
) -> BackendResult<bool> {
    let sql = format!(
        "UPDATE posts SET {col} = NOT {col}, updated_at = ? WHERE id = ? RETURNING {col}",
        col = column
    );
    let value: Option<bool> = sqlx::query_scalar(&sql)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    let value = value.ok_or_else(|| BackendError::not_found("post", id))?;
    tracing::info!("Post {} {} = {}", id, column, value);
    Ok(value)
}

/// Published posts liked by `user_id`, most recently liked first
pub async fn list_liked_posts(pool: &SqlitePool, user_id: i64) -> BackendResult<Vec<Post>> {
    list_related_posts(pool, Relation::Like, user_id).await
}

/// Published posts favorited by `user_id`, most recently favorited first
pub async fn list_favorite_posts(pool: &SqlitePool, user_id: i64) -> BackendResult<Vec<Post>> {
    list_related_posts(pool, Relation::Favorite, user_id).await
}

async fn list_related_posts(
    pool: &SqlitePool,
    relation: Relation,
    user_id: i64,
) -> BackendResult<Vec<Post>> {
    ensure_user(pool, user_id).await?;
    let ids = {
        let mut conn = pool.acquire().await?;
        graph::list_related(&mut conn, relation, user_id, Direction::Outgoing).await?
    };
    Ok(fetch_posts_by_ids(pool, &ids, true).await?)
}

pub(crate) async fn ensure_user(pool: &SqlitePool, user_id: i64) -> BackendResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    if count == 0 {
        return Err(BackendError::not_found("user", user_id));
    }
    Ok(())
}

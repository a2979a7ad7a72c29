//! Database operations for comments
//!
//! Comments are soft-deleted: `deleted_at` is set and the row stays so that
//! replies keep resolving their `reply_to` target.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::thread::build_thread;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::graph::{store::entity_exists, Entity};
use crate::backend::notifications::{notify_comment, CommentTargets};
use crate::backend::query::{begin_write, user_summary_from_row};
use crate::shared::blog::{Actor, Comment, CommentNode, CreateCommentRequest, UserComment};

const COMMENT_SELECT: &str = "\
    SELECT c.id, c.content, c.post_id, c.parent_id, c.reply_to_id, c.created_at, c.deleted_at, \
           u.id AS author_id, u.username AS author_username, u.avatar AS author_avatar \
    FROM comments c JOIN users u ON u.id = c.user_id";

fn comment_from_row(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        post_id: row.try_get("post_id")?,
        parent_id: row.try_get("parent_id")?,
        reply_to_id: row.try_get("reply_to_id")?,
        author: user_summary_from_row(row, "author_")?,
        created_at: row.try_get("created_at")?,
        deleted_at: row.try_get("deleted_at")?,
    })
}

fn user_comment_from_row(row: &SqliteRow) -> Result<UserComment, sqlx::Error> {
    Ok(UserComment {
        comment: comment_from_row(row)?,
        post_title: row.try_get("post_title")?,
    })
}

/// Get a comment by id, deleted or not
pub async fn fetch_comment(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Comment>, sqlx::Error> {
    let sql = format!("{} WHERE c.id = ?", COMMENT_SELECT);
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;
    row.as_ref().map(comment_from_row).transpose()
}

async fn post_author(conn: &mut SqliteConnection, post_id: i64) -> BackendResult<i64> {
    sqlx::query_scalar("SELECT user_id FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| BackendError::not_found("post", post_id))
}

/// Resolve and check the `parent_id`/`reply_to_id` of a new comment
async fn resolve_targets(
    conn: &mut SqliteConnection,
    request: &CreateCommentRequest,
) -> BackendResult<CommentTargets> {
    let post_author = post_author(&mut *conn, request.post_id).await?;

    let parent = match request.parent_id {
        Some(parent_id) => {
            let parent = fetch_comment(&mut *conn, parent_id)
                .await?
                .ok_or_else(|| BackendError::not_found("comment", parent_id))?;
            if parent.post_id != request.post_id {
                return Err(BackendError::invalid_reference(format!(
                    "comment {} does not belong to post {}",
                    parent_id, request.post_id
                )));
            }
            if !parent.is_top_level() {
                return Err(BackendError::invalid_reference(format!(
                    "comment {} is a reply and cannot be a parent",
                    parent_id
                )));
            }
            if parent.is_deleted() {
                return Err(BackendError::invalid_reference(format!(
                    "comment {} has been deleted",
                    parent_id
                )));
            }
            Some(parent)
        }
        None => None,
    };

    let reply_to = match (request.reply_to_id, &parent) {
        (None, _) => None,
        (Some(_), None) => {
            return Err(BackendError::invalid_reference(
                "reply_to_id requires parent_id",
            ))
        }
        (Some(reply_to_id), Some(_)) => {
            let target = fetch_comment(&mut *conn, reply_to_id)
                .await?
                .ok_or_else(|| BackendError::not_found("comment", reply_to_id))?;
            if target.post_id != request.post_id {
                return Err(BackendError::invalid_reference(format!(
                    "comment {} does not belong to post {}",
                    reply_to_id, request.post_id
                )));
            }
            if target.is_deleted() {
                return Err(BackendError::invalid_reference(format!(
                    "comment {} has been deleted",
                    reply_to_id
                )));
            }
            Some(target)
        }
    };

    Ok(CommentTargets {
        post_author,
        parent_author: parent.map(|c| c.author.id),
        reply_to_author: reply_to.map(|c| c.author.id),
    })
}

/// Create a comment written by `actor`, then notify whoever it addresses.
///
/// The notification is best-effort: a failure there is logged and the
/// comment is still returned.
///
/// # Errors
///
/// * `NotFound` - the post, parent or reply-to comment does not exist
/// * `InvalidReference` - the parent or reply-to comment is on another post,
///   deleted, or the parent is itself a reply
pub async fn create_comment(
    pool: &SqlitePool,
    actor: Actor,
    request: &CreateCommentRequest,
) -> BackendResult<Comment> {
    let now = Utc::now();

    let mut tx = begin_write(pool).await?;
    let targets = resolve_targets(&mut *tx, request).await?;
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO comments (content, user_id, post_id, parent_id, reply_to_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&request.content)
    .bind(actor.user_id)
    .bind(request.post_id)
    .bind(request.parent_id)
    .bind(request.reply_to_id)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;
    let comment = fetch_comment(&mut *tx, id)
        .await?
        .ok_or_else(|| BackendError::not_found("comment", id))?;
    tx.commit().await?;

    tracing::info!(
        "User {} commented {} on post {}",
        actor.user_id,
        comment.id,
        comment.post_id
    );

    if let Err(e) = notify_comment(pool, &comment, &targets).await {
        tracing::warn!("Notification for comment {} failed: {:?}", comment.id, e);
    }

    Ok(comment)
}

/// Soft-delete a comment, and its replies when it is top-level.
///
/// # Errors
///
/// * `NotFound` - the comment does not exist or is already deleted
/// * `Forbidden` - `actor` is neither the comment's author, the post's
///   author nor an admin
pub async fn delete_comment(pool: &SqlitePool, actor: Actor, id: i64) -> BackendResult<()> {
    let mut tx = begin_write(pool).await?;

    let comment = fetch_comment(&mut *tx, id)
        .await?
        .filter(|c| !c.is_deleted())
        .ok_or_else(|| BackendError::not_found("comment", id))?;
    let post_author = post_author(&mut *tx, comment.post_id).await?;

    if !actor.is_admin() && actor.user_id != comment.author.id && actor.user_id != post_author {
        tracing::warn!("User {} may not delete comment {}", actor.user_id, id);
        return Err(BackendError::forbidden(
            "only the comment author, the post author or an admin may delete this comment",
        ));
    }

    let result = sqlx::query(
        "UPDATE comments SET deleted_at = ? WHERE (id = ? OR parent_id = ?) AND deleted_at IS NULL",
    )
    .bind(Utc::now())
    .bind(id)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::info!(
        "User {} deleted comment {} ({} rows)",
        actor.user_id,
        id,
        result.rows_affected()
    );
    Ok(())
}

/// The thread of a post.
///
/// # Errors
///
/// * `NotFound` - the post does not exist
pub async fn get_thread(pool: &SqlitePool, post_id: i64) -> BackendResult<Vec<CommentNode>> {
    let mut conn = pool.acquire().await?;
    if !entity_exists(&mut conn, Entity::Post, post_id).await? {
        return Err(BackendError::not_found("post", post_id));
    }

    let sql = format!("{} WHERE c.post_id = ?", COMMENT_SELECT);
    let rows = sqlx::query(&sql).bind(post_id).fetch_all(&mut *conn).await?;
    let comments = rows
        .iter()
        .map(comment_from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(build_thread(comments))
}

/// Live comments written by `user_id`, newest first
pub async fn list_comments_by_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<UserComment>, sqlx::Error> {
    let sql = format!(
        "SELECT sub.*, p.title AS post_title FROM ({}) sub JOIN posts p ON p.id = sub.post_id \
         WHERE sub.author_id = ? AND sub.deleted_at IS NULL \
         ORDER BY sub.created_at DESC, sub.id DESC",
        COMMENT_SELECT
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    rows.iter().map(user_comment_from_row).collect()
}

/// Live comments on posts written by `user_id`, newest first
pub async fn list_comments_on_user_posts(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<UserComment>, sqlx::Error> {
    let sql = format!(
        "SELECT sub.*, p.title AS post_title FROM ({}) sub JOIN posts p ON p.id = sub.post_id \
         WHERE p.user_id = ? AND sub.deleted_at IS NULL \
         ORDER BY sub.created_at DESC, sub.id DESC",
        COMMENT_SELECT
    );
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    rows.iter().map(user_comment_from_row).collect()
}

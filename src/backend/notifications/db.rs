//! Database operations for notifications

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::query::user_summary_from_row;
use crate::shared::blog::{Notification, NotificationKind};

/// A notification about to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: i64,
    pub from_user_id: i64,
    pub kind: NotificationKind,
    pub content: String,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
}

fn notification_from_row(row: &SqliteRow) -> Result<Notification, sqlx::Error> {
    let kind: String = row.try_get("kind")?;
    let kind = NotificationKind::from_str(&kind).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "kind".to_string(),
        source: format!("unknown notification kind '{}'", kind).into(),
    })?;

    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        from_user: user_summary_from_row(row, "from_")?,
        kind,
        content: row.try_get("content")?,
        post_id: row.try_get("post_id")?,
        comment_id: row.try_get("comment_id")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Store a notification, returning its id
pub async fn insert_notification(
    pool: &SqlitePool,
    notification: &NewNotification,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO notifications (user_id, from_user_id, kind, content, post_id, comment_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(notification.user_id)
    .bind(notification.from_user_id)
    .bind(notification.kind.as_str())
    .bind(&notification.content)
    .bind(notification.post_id)
    .bind(notification.comment_id)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Notifications addressed to `user_id`, newest first
pub async fn list_notifications(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT n.id, n.user_id, n.kind, n.content, n.post_id, n.comment_id, n.is_read, n.created_at,
               f.id AS from_id, f.username AS from_username, f.avatar AS from_avatar
        FROM notifications n
        JOIN users f ON f.id = n.from_user_id
        WHERE n.user_id = ?
        ORDER BY n.created_at DESC, n.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(notification_from_row).collect()
}

pub async fn unread_count(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Mark one of `user_id`'s notifications read.
///
/// # Errors
///
/// * `NotFound` - no such notification, or it belongs to someone else
pub async fn mark_read(pool: &SqlitePool, user_id: i64, id: i64) -> BackendResult<()> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BackendError::not_found("notification", id));
    }
    Ok(())
}

/// Mark every unread notification of `user_id` read, returning how many flipped
pub async fn mark_all_read(pool: &SqlitePool, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

//! Notification fan-out for new comments
//!
//! A new comment notifies exactly one user:
//!
//! - a reply notifies the author of its `reply_to` comment, or of its parent
//!   comment when `reply_to` is unset
//! - a top-level comment notifies the post's author
//!
//! Nobody is notified about their own comment.

use sqlx::SqlitePool;

use super::db::{insert_notification, NewNotification};
use crate::shared::blog::{excerpt, Comment, NotificationKind};

/// Authors of the entities a new comment points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTargets {
    pub post_author: i64,
    /// Author of the parent comment; `None` for a top-level comment
    pub parent_author: Option<i64>,
    pub reply_to_author: Option<i64>,
}

/// Pick the recipient of the notification for a comment by `commenter`
pub fn select_recipient(
    commenter: i64,
    targets: &CommentTargets,
) -> Option<(i64, NotificationKind)> {
    let (recipient, kind) = match targets.parent_author {
        Some(parent_author) => (
            targets.reply_to_author.unwrap_or(parent_author),
            NotificationKind::Reply,
        ),
        None => (targets.post_author, NotificationKind::Comment),
    };

    (recipient != commenter).then_some((recipient, kind))
}

/// Persist the notification for `comment`, if any.
///
/// Returns the id of the stored notification.
pub async fn notify_comment(
    pool: &SqlitePool,
    comment: &Comment,
    targets: &CommentTargets,
) -> Result<Option<i64>, sqlx::Error> {
    let Some((recipient, kind)) = select_recipient(comment.author.id, targets) else {
        tracing::debug!("Comment {} needs no notification", comment.id);
        return Ok(None);
    };

    let id = insert_notification(
        pool,
        &NewNotification {
            user_id: recipient,
            from_user_id: comment.author.id,
            kind,
            content: excerpt(&comment.content),
            post_id: Some(comment.post_id),
            comment_id: Some(comment.id),
        },
    )
    .await?;

    tracing::info!(
        "Notified user {} of {} {} on post {}",
        recipient,
        kind.as_str(),
        comment.id,
        comment.post_id
    );
    Ok(Some(id))
}

//! Notification Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Maximum excerpt length, in characters (before the ellipsis)
pub const EXCERPT_LEN: usize = 100;

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Top-level comment on the recipient's post
    Comment,
    /// Reply to one of the recipient's comments
    Reply,
    Like,
    Follow,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Reply => "reply",
            NotificationKind::Like => "like",
            NotificationKind::Follow => "follow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "comment" => Some(NotificationKind::Comment),
            "reply" => Some(NotificationKind::Reply),
            "like" => Some(NotificationKind::Like),
            "follow" => Some(NotificationKind::Follow),
            _ => None,
        }
    }
}

/// A persisted notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    /// Recipient
    pub user_id: i64,
    pub from_user: UserSummary,
    pub kind: NotificationKind,
    /// Short excerpt of the triggering content
    pub content: String,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// First [`EXCERPT_LEN`] characters of `content`, with `…` when truncated
pub fn excerpt(content: &str) -> String {
    let mut chars = content.char_indices();
    match chars.nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}…", &content[..cut]),
        None => content.to_string(),
    }
}

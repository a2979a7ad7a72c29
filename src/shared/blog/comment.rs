//! Comment Data Structures
//!
//! Comments form a two-level thread: top-level comments attached to a post,
//! and replies attached to a top-level comment. A reply may additionally
//! point at a specific comment it answers (`reply_to_id`), which is only used
//! to show who is being replied to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;
use crate::shared::error::SharedError;

/// Maximum comment length, in characters
pub const MAX_COMMENT_LEN: usize = 2000;

/// A stored comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub parent_id: Option<i64>,
    pub reply_to_id: Option<i64>,
    pub author: UserSummary,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// A comment positioned in a thread.
///
/// `reply_to_user` is resolved on every read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub reply_to_user: Option<UserSummary>,
    pub replies: Vec<CommentNode>,
}

/// A comment listed outside its thread, with the title of its post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub post_title: String,
}

/// Request to create a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub reply_to_id: Option<i64>,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.content.trim().is_empty() {
            return Err(SharedError::validation("content", "content cannot be empty"));
        }
        SharedError::check_length("content", &self.content, 1, MAX_COMMENT_LEN)
    }
}

//! Post Data Structures
//!
//! Posts as returned by the feed, plus the request bodies used to create and
//! update them. Like, favorite and comment counts are always computed from
//! the underlying relations when the post is read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tag::{validate_tag_names, Tag};
use super::user::UserSummary;
use crate::shared::error::SharedError;

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Visibility of a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Published,
    Hidden,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Hidden => "hidden",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "published" => Some(PostStatus::Published),
            "hidden" => Some(PostStatus::Hidden),
            _ => None,
        }
    }
}

/// Metric used for the second ordering tier of a feed listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Views,
    Likes,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::Views => "views",
            SortKey::Likes => "likes",
        }
    }

    /// Parse an `order_by` query value. Unknown keys yield `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "created_at" => Some(SortKey::CreatedAt),
            "views" | "view_count" => Some(SortKey::Views),
            "likes" | "like_count" => Some(SortKey::Likes),
            _ => None,
        }
    }

    pub fn is_time_based(&self) -> bool {
        matches!(self, SortKey::CreatedAt)
    }
}

/// A post with its author, tags and live engagement counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: UserSummary,
    pub status: PostStatus,
    pub personal_top: bool,
    pub site_top: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub favorite_count: i64,
    pub comment_count: i64,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagination metadata of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: i64,
    pub page_size: i64,
    /// Rows matching the filters before pagination
    pub total: i64,
}

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub meta: PageMeta,
}

pub type PostPage = Page<Post>;

/// Like/favorite state of a post, optionally from a viewer's perspective
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Engagement {
    pub like_count: i64,
    pub favorite_count: i64,
    pub liked: bool,
    pub favorited: bool,
}

/// Result of a toggle: the state after the call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToggleResponse {
    pub active: bool,
}

/// Request to create a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title_and_content(&self.title, &self.content)?;
        validate_tag_names(&self.tags)
    }
}

/// Request to update a post. Absent tags leave the tag set unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title_and_content(&self.title, &self.content)?;
        match &self.tags {
            Some(tags) => validate_tag_names(tags),
            None => Ok(()),
        }
    }
}

fn validate_title_and_content(title: &str, content: &str) -> Result<(), SharedError> {
    SharedError::check_length("title", title, 1, MAX_TITLE_LEN)?;
    if content.trim().is_empty() {
        return Err(SharedError::validation("content", "content cannot be empty"));
    }
    Ok(())
}

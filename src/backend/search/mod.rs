//! Global search
//!
//! One keyword searched across published posts (title, author, tags), users
//! and tags.

pub mod handlers;

use sqlx::SqlitePool;

use crate::backend::error::BackendResult;
use crate::backend::posts::feed::{self, FeedQuery};
use crate::backend::social::search_users;
use crate::backend::tags::db::search_tags;
use crate::shared::blog::search::{SEARCH_POST_LIMIT, SEARCH_TAG_LIMIT, SEARCH_USER_LIMIT};
use crate::shared::blog::SearchResults;
use crate::shared::SharedError;

/// Search posts, users and tags for `keyword`.
///
/// # Errors
///
/// * validation error - the keyword is blank
pub async fn global_search(pool: &SqlitePool, keyword: &str) -> BackendResult<SearchResults> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(SharedError::validation("keyword", "keyword cannot be empty").into());
    }

    let query = FeedQuery {
        page_size: SEARCH_POST_LIMIT,
        keyword: Some(keyword.to_string()),
        ..FeedQuery::default()
    };
    let posts = feed::list_posts(pool, &query).await?.list;
    let users = search_users(pool, keyword, SEARCH_USER_LIMIT).await?;
    let tags = search_tags(pool, keyword, SEARCH_TAG_LIMIT).await?;

    tracing::debug!(
        "Search '{}': {} posts, {} users, {} tags",
        keyword,
        posts.len(),
        users.len(),
        tags.len()
    );

    Ok(SearchResults { posts, users, tags })
}

//! Global search results

use serde::{Deserialize, Serialize};

use super::post::Post;
use super::tag::Tag;
use super::user::UserSummary;

pub const SEARCH_POST_LIMIT: i64 = 10;
pub const SEARCH_USER_LIMIT: i64 = 10;
pub const SEARCH_TAG_LIMIT: i64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    pub posts: Vec<Post>,
    pub users: Vec<UserSummary>,
    pub tags: Vec<Tag>,
}

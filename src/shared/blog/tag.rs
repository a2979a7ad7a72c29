//! Tag Data Structures

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Maximum number of tags on a single post
pub const MAX_TAGS_PER_POST: usize = 10;

/// Maximum length of a tag name, in characters
pub const MAX_TAG_LEN: usize = 50;

/// A tag identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A tag together with the number of posts carrying it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagWithCount {
    pub id: i64,
    pub name: String,
    pub post_count: i64,
}

/// Validate the tag names of a post body.
///
/// Names are taken verbatim. Duplicates are allowed here and collapse when
/// resolved.
pub fn validate_tag_names(names: &[String]) -> Result<(), SharedError> {
    if names.len() > MAX_TAGS_PER_POST {
        return Err(SharedError::validation(
            "tags",
            format!("a post may carry at most {} tags", MAX_TAGS_PER_POST),
        ));
    }
    for name in names {
        SharedError::check_length("tags", name, 1, MAX_TAG_LEN)?;
    }
    Ok(())
}

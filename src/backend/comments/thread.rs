//! Comment thread assembly
//!
//! Comments reference each other by id (`parent_id`, `reply_to_id`), so the
//! thread is built from a flat arena of every comment on the post, deleted
//! ones included. Deleted comments are left out of the tree but still
//! resolve as `reply_to` targets.

use std::collections::HashMap;

use crate::shared::blog::{Comment, CommentNode};

/// Arrange the comments of one post into a two-level thread.
///
/// Top-level comments come newest first; the replies under each come oldest
/// first. A reply whose parent is missing or deleted is dropped.
pub fn build_thread(comments: Vec<Comment>) -> Vec<CommentNode> {
    let index: HashMap<i64, usize> = comments
        .iter()
        .enumerate()
        .map(|(position, comment)| (comment.id, position))
        .collect();

    let mut top_level: Vec<&Comment> = Vec::new();
    let mut replies: HashMap<i64, Vec<&Comment>> = HashMap::new();
    for comment in comments.iter().filter(|c| !c.is_deleted()) {
        match comment.parent_id {
            None => top_level.push(comment),
            Some(parent_id) => replies.entry(parent_id).or_default().push(comment),
        }
    }

    top_level.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

    top_level
        .into_iter()
        .map(|comment| {
            let mut children = replies.remove(&comment.id).unwrap_or_default();
            children.sort_by_key(|c| (c.created_at, c.id));

            let children = children
                .into_iter()
                .map(|reply| CommentNode {
                    comment: reply.clone(),
                    reply_to_user: reply
                        .reply_to_id
                        .and_then(|id| index.get(&id))
                        .map(|&position| comments[position].author.clone()),
                    replies: Vec::new(),
                })
                .collect();

            CommentNode {
                comment: comment.clone(),
                reply_to_user: None,
                replies: children,
            }
        })
        .collect()
}

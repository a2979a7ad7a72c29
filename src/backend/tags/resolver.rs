//! Tag resolution
//!
//! Maps free-text tag names to tag identities, creating tags on first use,
//! and replaces the tag set of a post in one transaction.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::{Connection, Row, SqliteConnection};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::graph::{self, Direction, Relation};
use crate::backend::query::fold_case;
use crate::shared::blog::Tag;

/// Resolve tag names to tags, creating the missing ones.
///
/// Names are matched exactly (case-sensitive, no trimming). Duplicate names
/// collapse to one tag. The result follows the first occurrence of each
/// name in `names`. Runs as a savepoint when `conn` is inside a transaction.
pub async fn resolve_tags(
    conn: &mut SqliteConnection,
    names: &[String],
) -> Result<Vec<Tag>, sqlx::Error> {
    let mut tx = conn.begin().await?;
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for name in names {
        if !seen.insert(name.as_str()) {
            continue;
        }

        let created = sqlx::query(
            r#"
            INSERT INTO tags (name, name_folded, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(fold_case(name))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT id, name FROM tags WHERE name = ?")
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        let tag = Tag {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        };

        if created.rows_affected() > 0 {
            tracing::debug!("Created tag '{}' ({})", tag.name, tag.id);
        }
        tags.push(tag);
    }

    tx.commit().await?;
    Ok(tags)
}

/// Replace the whole tag set of a post.
///
/// Edges to tags outside the new set are removed, edges to new tags are
/// added and edges present in both are left untouched. Readers never see an
/// intermediate set.
///
/// # Returns
///
/// The post's tags after the replacement.
///
/// # Errors
///
/// * `NotFound` - the post does not exist
pub async fn replace_post_tags(
    conn: &mut SqliteConnection,
    post_id: i64,
    names: &[String],
) -> BackendResult<Vec<Tag>> {
    let mut tx = conn.begin().await?;

    // Lead with a write so the transaction holds the write lock before it
    // reads the current set.
    let touched = sqlx::query("UPDATE posts SET updated_at = updated_at WHERE id = ?")
        .bind(post_id)
        .execute(&mut *tx)
        .await?;
    if touched.rows_affected() == 0 {
        return Err(BackendError::not_found("post", post_id));
    }

    let tags = resolve_tags(&mut tx, names).await?;
    let wanted: HashSet<i64> = tags.iter().map(|t| t.id).collect();
    let current: HashSet<i64> =
        graph::list_related(&mut tx, Relation::PostTag, post_id, Direction::Outgoing)
            .await?
            .into_iter()
            .collect();

    for tag_id in current.difference(&wanted) {
        graph::remove_edge(&mut tx, Relation::PostTag, post_id, *tag_id).await?;
    }
    for tag_id in wanted.difference(&current) {
        graph::add_edge(&mut tx, Relation::PostTag, post_id, *tag_id).await?;
    }

    tx.commit().await?;
    tracing::debug!("Post {} now carries {} tags", post_id, tags.len());
    Ok(tags)
}

//! Database operations for tag listings

use std::collections::HashMap;

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::backend::query::like_pattern;
use crate::shared::blog::{Tag, TagWithCount};

/// All tags with the number of posts carrying each, ordered by name.
///
/// Tags no longer attached to any post are listed with a count of 0.
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<TagWithCount>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.name, COUNT(pt.post_id) AS post_count
        FROM tags t
        LEFT JOIN post_tags pt ON pt.tag_id = t.id
        GROUP BY t.id, t.name
        ORDER BY t.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(TagWithCount {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                post_count: row.try_get("post_count")?,
            })
        })
        .collect()
}

/// Tags whose name contains `keyword`, case-insensitively
pub async fn search_tags(
    pool: &SqlitePool,
    keyword: &str,
    limit: i64,
) -> Result<Vec<Tag>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name
        FROM tags
        WHERE name_folded LIKE ? ESCAPE '\'
        ORDER BY name ASC
        LIMIT ?
        "#,
    )
    .bind(like_pattern(keyword))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            Ok(Tag {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

/// Tags of each post in `post_ids`, ordered by name within a post.
///
/// Posts without tags are absent from the map.
pub async fn tags_for_posts(
    pool: &SqlitePool,
    post_ids: &[i64],
) -> Result<HashMap<i64, Vec<Tag>>, sqlx::Error> {
    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(tags);
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT pt.post_id, t.id, t.name FROM post_tags pt JOIN tags t ON t.id = pt.tag_id WHERE pt.post_id IN (",
    );
    let mut separated = builder.separated(", ");
    for id in post_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY t.name ASC");

    let rows = builder.build().fetch_all(pool).await?;
    for row in rows {
        let post_id: i64 = row.try_get("post_id")?;
        tags.entry(post_id).or_default().push(Tag {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        });
    }
    Ok(tags)
}

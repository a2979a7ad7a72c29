//! Tag resolver integration tests

use assert_matches::assert_matches;
use blogforge::backend::error::BackendError;
use blogforge::backend::tags::db::{list_tags, search_tags};
use blogforge::backend::tags::{replace_post_tags, resolve_tags};
use blogforge::shared::blog::Tag;
use chrono::{DateTime, Utc};
use crate::common::*;
use pretty_assertions::assert_eq;
use sqlx::SqlitePool;

fn names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.name.as_str()).collect()
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

async fn tag_linked_at(pool: &SqlitePool, post_id: i64, name: &str) -> DateTime<Utc> {
    sqlx::query_scalar(
        "SELECT pt.created_at FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
         WHERE pt.post_id = ? AND t.name = ?",
    )
    .bind(post_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_resolve_creates_once_and_dedupes() {
    let db = TestDatabase::new().await;

    let (first, second) = {
        let mut conn = db.pool().acquire().await.unwrap();
        let first = resolve_tags(&mut conn, &strings(&["rust", "sql", "rust"]))
            .await
            .unwrap();
        let second = resolve_tags(&mut conn, &strings(&["sql", "Rust"])).await.unwrap();
        (first, second)
    };
    assert_eq!(names(&first), vec!["rust", "sql"]);
    assert_eq!(second[0], first[1]);
    // Case-sensitive: "Rust" is a different tag
    assert_ne!(second[1].id, first[0].id);

    assert_eq!(list_tags(db.pool()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_replace_keeps_shared_edge_untouched() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let post = create_test_post(&db, alice, "Tagged", &["A", "B"]).await;
    let b_linked = tag_linked_at(db.pool(), post.id, "B").await;

    let tags = {
        let mut conn = db.pool().acquire().await.unwrap();
        replace_post_tags(&mut conn, post.id, &strings(&["B", "C"]))
            .await
            .unwrap()
    };
    let mut attached = names(&tags);
    attached.sort();
    assert_eq!(attached, vec!["B", "C"]);

    assert_eq!(tag_linked_at(db.pool(), post.id, "B").await, b_linked);

    // A stays around as an orphan tag
    let all = list_tags(db.pool()).await.unwrap();
    let a = all.iter().find(|t| t.name == "A").unwrap();
    assert_eq!(a.post_count, 0);
    let c = all.iter().find(|t| t.name == "C").unwrap();
    assert_eq!(c.post_count, 1);
}

#[tokio::test]
async fn test_replace_on_missing_post() {
    let db = TestDatabase::new().await;

    let result = {
        let mut conn = db.pool().acquire().await.unwrap();
        replace_post_tags(&mut conn, 42, &strings(&["x"])).await
    };
    assert_matches!(result, Err(BackendError::NotFound { entity: "post", id: 42 }));
    assert!(list_tags(db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_rolls_back_with_enclosing_transaction() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let post = create_test_post(&db, alice, "Tagged", &["A"]).await;

    let mut tx = db.pool().begin().await.unwrap();
    replace_post_tags(&mut tx, post.id, &strings(&["B"]))
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let all: Vec<(String, i64)> = list_tags(db.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|t| (t.name, t.post_count))
        .collect();
    assert_eq!(all, vec![("A".to_string(), 1)]);
}

#[tokio::test]
async fn test_search_tags_is_case_insensitive_substring() {
    let db = TestDatabase::new().await;
    {
        let mut conn = db.pool().acquire().await.unwrap();
        resolve_tags(&mut conn, &strings(&["Rustacean", "trust", "go", "100%"]))
            .await
            .unwrap();
    }

    let found = search_tags(db.pool(), "rust", 10).await.unwrap();
    assert_eq!(names(&found), vec!["Rustacean", "trust"]);

    let found = search_tags(db.pool(), "%", 10).await.unwrap();
    assert_eq!(names(&found), vec!["100%"]);
}

#[tokio::test]
async fn test_search_tags_folds_non_ascii_case() {
    let db = TestDatabase::new().await;
    {
        let mut conn = db.pool().acquire().await.unwrap();
        resolve_tags(&mut conn, &strings(&["Ökologie", "ÉTÉ", "oko"]))
            .await
            .unwrap();
    }

    let found = search_tags(db.pool(), "ökolo", 10).await.unwrap();
    assert_eq!(names(&found), vec!["Ökologie"]);

    let found = search_tags(db.pool(), "été", 10).await.unwrap();
    assert_eq!(names(&found), vec!["ÉTÉ"]);
}

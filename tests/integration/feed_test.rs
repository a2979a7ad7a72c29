//! Feed ranking and post lifecycle integration tests

use assert_matches::assert_matches;
use blogforge::backend::error::BackendError;
use blogforge::backend::posts::counters::{engagement, toggle_favorite, toggle_like};
use blogforge::backend::posts::db::{
    delete_post, fetch_post, list_favorite_posts, list_liked_posts, toggle_personal_top,
    toggle_site_top, update_post,
};
use blogforge::backend::posts::feed::{
    get_hot_posts, get_post_detail, list_posts, list_user_posts, FeedQuery, StatusFilter,
};
use blogforge::backend::search::global_search;
use blogforge::shared::blog::{Post, PostStatus, SortKey, UpdatePostRequest};
use blogforge::shared::SharedError;
use pretty_assertions::assert_eq;

use crate::common::*;

fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(|p| p.id).collect()
}

#[tokio::test]
async fn test_pagination_over_25_rows() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    for i in 0..25 {
        create_test_post(&db, alice, &format!("Post {}", i), &[]).await;
    }

    let page = |page| FeedQuery {
        page,
        page_size: 10,
        ..FeedQuery::default()
    };

    let second = list_posts(db.pool(), &page(2)).await.unwrap();
    assert_eq!(second.list.len(), 10);
    assert_eq!(second.meta.total, 25);
    assert_eq!(second.meta.current_page, 2);

    let third = list_posts(db.pool(), &page(3)).await.unwrap();
    assert_eq!(third.list.len(), 5);
    assert_eq!(third.meta.total, 25);
    // Newest first: the last page holds the oldest posts
    assert_eq!(third.list[4].title, "Post 0");
}

#[tokio::test]
async fn test_personal_pin_leads_author_listing() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let oldest = create_test_post(&db, alice, "Oldest", &[]).await;
    let middle = create_test_post(&db, alice, "Middle", &[]).await;
    let newest = create_test_post(&db, alice, "Newest", &[]).await;

    assert!(toggle_personal_top(db.pool(), alice, oldest.id).await.unwrap());

    let listing = list_user_posts(db.pool(), alice.user_id, 1, 20).await.unwrap();
    assert_eq!(ids(&listing.list), vec![oldest.id, newest.id, middle.id]);

    // The personal pin has no effect on the global feed
    let feed = list_posts(db.pool(), &FeedQuery::default()).await.unwrap();
    assert_eq!(ids(&feed.list), vec![newest.id, middle.id, oldest.id]);
}

#[tokio::test]
async fn test_site_pin_leads_time_ordered_feed_only() {
    let db = TestDatabase::new().await;
    let admin = create_test_admin(&db, "root").await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let pinned = create_test_post(&db, alice, "Pinned", &[]).await;
    let popular = create_test_post(&db, alice, "Popular", &[]).await;

    let result = toggle_site_top(db.pool(), alice, pinned.id).await;
    assert_matches!(result, Err(BackendError::Forbidden { .. }));
    assert!(toggle_site_top(db.pool(), admin, pinned.id).await.unwrap());

    let feed = list_posts(db.pool(), &FeedQuery::default()).await.unwrap();
    assert_eq!(ids(&feed.list), vec![pinned.id, popular.id]);

    toggle_like(db.pool(), bob.user_id, popular.id).await.unwrap();
    let by_likes = FeedQuery {
        sort: SortKey::Likes,
        ..FeedQuery::default()
    };
    let feed = list_posts(db.pool(), &by_likes).await.unwrap();
    assert_eq!(ids(&feed.list), vec![popular.id, pinned.id]);

    // Toggling again unpins
    assert!(!toggle_site_top(db.pool(), admin, pinned.id).await.unwrap());
}

#[tokio::test]
async fn test_filters_combine() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bobby").await;
    let rust = create_test_post(&db, alice, "Ownership explained", &["rust"]).await;
    let sql = create_test_post(&db, alice, "Joins", &["sql"]).await;
    let bobs = create_test_post(&db, bob, "Borrowing", &["rust"]).await;
    create_post_with_status(&db, alice, "Secret rust", &["rust"], PostStatus::Hidden).await;

    let by_tag = FeedQuery {
        tag: Some("rust".to_string()),
        ..FeedQuery::default()
    };
    let page = list_posts(db.pool(), &by_tag).await.unwrap();
    assert_eq!(ids(&page.list), vec![bobs.id, rust.id]);
    assert_eq!(page.meta.total, 2);

    let by_author_and_tag = FeedQuery {
        author_id: Some(alice.user_id),
        ..by_tag.clone()
    };
    let page = list_posts(db.pool(), &by_author_and_tag).await.unwrap();
    assert_eq!(ids(&page.list), vec![rust.id]);

    let any_status = FeedQuery {
        status: StatusFilter::Any,
        ..by_author_and_tag
    };
    assert_eq!(list_posts(db.pool(), &any_status).await.unwrap().meta.total, 2);

    // Keyword matches title, author username or tag name
    let keyword = |k: &str| FeedQuery {
        keyword: Some(k.to_string()),
        ..FeedQuery::default()
    };
    let page = list_posts(db.pool(), &keyword("JOIN")).await.unwrap();
    assert_eq!(ids(&page.list), vec![sql.id]);
    let page = list_posts(db.pool(), &keyword("bob")).await.unwrap();
    assert_eq!(ids(&page.list), vec![bobs.id]);
    let page = list_posts(db.pool(), &keyword("sq")).await.unwrap();
    assert_eq!(ids(&page.list), vec![sql.id]);
}

#[tokio::test]
async fn test_hot_posts_ordering() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let carol = create_test_user(&db, "carol").await;
    let quiet = create_test_post(&db, alice, "Quiet", &[]).await;
    let liked = create_test_post(&db, alice, "Liked", &[]).await;
    let most_liked = create_test_post(&db, alice, "Most liked", &[]).await;
    let hidden =
        create_post_with_status(&db, alice, "Hidden", &[], PostStatus::Hidden).await;

    for user in [bob, carol] {
        toggle_like(db.pool(), user.user_id, most_liked.id).await.unwrap();
        toggle_like(db.pool(), user.user_id, hidden.id).await.unwrap();
    }
    toggle_like(db.pool(), bob.user_id, liked.id).await.unwrap();

    let hot = get_hot_posts(db.pool(), 5).await.unwrap();
    assert_eq!(ids(&hot), vec![most_liked.id, liked.id, quiet.id]);
    assert_eq!(hot[0].like_count, 2);

    let top_one = get_hot_posts(db.pool(), 1).await.unwrap();
    assert_eq!(ids(&top_one), vec![most_liked.id]);
}

#[tokio::test]
async fn test_detail_counts_every_view() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let post = create_test_post(&db, alice, "Viewed", &[]).await;

    assert_eq!(get_post_detail(db.pool(), post.id, None).await.unwrap().view_count, 1);
    assert_eq!(get_post_detail(db.pool(), post.id, Some(alice)).await.unwrap().view_count, 2);
    assert_eq!(fetch_post(db.pool(), post.id).await.unwrap().unwrap().view_count, 2);

    let result = get_post_detail(db.pool(), 404, None).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_hidden_detail_visible_to_author_only() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let admin = create_test_admin(&db, "root").await;
    let post = create_post_with_status(&db, alice, "Draft", &[], PostStatus::Hidden).await;

    let result = get_post_detail(db.pool(), post.id, Some(bob)).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
    let result = get_post_detail(db.pool(), post.id, None).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));

    get_post_detail(db.pool(), post.id, Some(alice)).await.unwrap();
    let seen = get_post_detail(db.pool(), post.id, Some(admin)).await.unwrap();
    assert_eq!(seen.view_count, 2);
}

#[tokio::test]
async fn test_delete_post_authorization() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let admin = create_test_admin(&db, "root").await;
    let first = create_test_post(&db, alice, "First", &[]).await;
    let second = create_test_post(&db, alice, "Second", &[]).await;

    let result = delete_post(db.pool(), bob, first.id).await;
    assert_matches!(result, Err(BackendError::Forbidden { .. }));
    assert!(fetch_post(db.pool(), first.id).await.unwrap().is_some());

    delete_post(db.pool(), alice, first.id).await.unwrap();
    delete_post(db.pool(), admin, second.id).await.unwrap();
    assert!(fetch_post(db.pool(), first.id).await.unwrap().is_none());
    assert!(fetch_post(db.pool(), second.id).await.unwrap().is_none());

    let result = delete_post(db.pool(), alice, first.id).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_post_tags_optional() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let post = create_test_post(&db, alice, "Before", &["a", "b"]).await;

    let mut request = UpdatePostRequest {
        title: "After".to_string(),
        content: "New body".to_string(),
        tags: None,
        status: None,
    };

    let result = update_post(db.pool(), bob, post.id, &request).await;
    assert_matches!(result, Err(BackendError::Forbidden { .. }));

    let updated = update_post(db.pool(), alice, post.id, &request).await.unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.tags.len(), 2);
    assert_eq!(updated.status, PostStatus::Published);

    request.tags = Some(vec!["c".to_string()]);
    request.status = Some(PostStatus::Hidden);
    let updated = update_post(db.pool(), alice, post.id, &request).await.unwrap();
    let tags: Vec<&str> = updated.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["c"]);
    assert_eq!(updated.status, PostStatus::Hidden);
}

#[tokio::test]
async fn test_rejected_update_changes_nothing() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let post = create_test_post(&db, alice, "Original", &["keep"]).await;

    let request = UpdatePostRequest {
        title: "Hijacked".to_string(),
        content: "Hijacked body".to_string(),
        tags: Some(vec!["spam".to_string()]),
        status: Some(PostStatus::Hidden),
    };
    let result = update_post(db.pool(), bob, post.id, &request).await;
    assert_matches!(result, Err(BackendError::Forbidden { .. }));

    let stored = fetch_post(db.pool(), post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Original");
    assert_eq!(stored.status, PostStatus::Published);
    let tags: Vec<&str> = stored.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["keep"]);

    // The rejected tag was never created
    let found = global_search(db.pool(), "spam").await.unwrap();
    assert!(found.tags.is_empty());

    let result = update_post(db.pool(), alice, 9999, &request).await;
    assert_matches!(result, Err(BackendError::NotFound { entity: "post", id: 9999 }));
}

#[tokio::test]
async fn test_unknown_stored_status_is_decode_error() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let post = create_test_post(&db, alice, "Corrupted", &[]).await;

    sqlx::query("UPDATE posts SET status = 'archived' WHERE id = ?")
        .bind(post.id)
        .execute(db.pool())
        .await
        .unwrap();

    let result = fetch_post(db.pool(), post.id).await;
    assert_matches!(result, Err(sqlx::Error::ColumnDecode { ref index, .. }) if index == "status");
}

#[tokio::test]
async fn test_keyword_search_folds_non_ascii_case() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "Ågot").await;
    let bob = create_test_user(&db, "bob").await;
    let street = create_test_post(&db, bob, "Über Straße", &[]).await;
    let hers = create_test_post(&db, alice, "Notes", &["Ελληνικά"]).await;
    create_test_post(&db, bob, "Uber alles", &[]).await;

    let keyword = |k: &str| FeedQuery {
        keyword: Some(k.to_string()),
        ..FeedQuery::default()
    };

    let page = list_posts(db.pool(), &keyword("über")).await.unwrap();
    assert_eq!(ids(&page.list), vec![street.id]);
    assert_eq!(page.meta.total, 1);

    let page = list_posts(db.pool(), &keyword("STRASSE")).await.unwrap();
    assert_eq!(page.meta.total, 0);
    let page = list_posts(db.pool(), &keyword("STRAßE")).await.unwrap();
    assert_eq!(ids(&page.list), vec![street.id]);

    // Author username and tag name fold the same way
    let page = list_posts(db.pool(), &keyword("ågot")).await.unwrap();
    assert_eq!(ids(&page.list), vec![hers.id]);
    let page = list_posts(db.pool(), &keyword("ελλην")).await.unwrap();
    assert_eq!(ids(&page.list), vec![hers.id]);

    let results = global_search(db.pool(), "ÅGOT").await.unwrap();
    assert_eq!(results.users.len(), 1);
    assert_eq!(results.users[0].username, "Ågot");
}

#[tokio::test]
async fn test_toggles_and_engagement() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let post = create_test_post(&db, alice, "Likeable", &[]).await;

    assert!(toggle_like(db.pool(), bob.user_id, post.id).await.unwrap());
    assert!(toggle_favorite(db.pool(), bob.user_id, post.id).await.unwrap());

    let seen_by_bob = engagement(db.pool(), post.id, Some(bob.user_id)).await.unwrap();
    assert_eq!(seen_by_bob.like_count, 1);
    assert_eq!(seen_by_bob.favorite_count, 1);
    assert!(seen_by_bob.liked && seen_by_bob.favorited);

    let anonymous = engagement(db.pool(), post.id, None).await.unwrap();
    assert!(!anonymous.liked && !anonymous.favorited);

    assert_eq!(ids(&list_liked_posts(db.pool(), bob.user_id).await.unwrap()), vec![post.id]);
    assert_eq!(
        ids(&list_favorite_posts(db.pool(), bob.user_id).await.unwrap()),
        vec![post.id]
    );

    assert!(!toggle_like(db.pool(), bob.user_id, post.id).await.unwrap());
    assert!(list_liked_posts(db.pool(), bob.user_id).await.unwrap().is_empty());

    let result = toggle_like(db.pool(), bob.user_id, 999).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
    let result = engagement(db.pool(), 999, None).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_global_search() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "rustacean").await;
    create_test_user(&db, "gopher").await;
    let post = create_test_post(&db, alice, "Hello world", &["rustlang"]).await;

    let results = global_search(db.pool(), " rust ").await.unwrap();
    assert_eq!(ids(&results.posts), vec![post.id]);
    assert_eq!(results.users.len(), 1);
    assert_eq!(results.users[0].username, "rustacean");
    assert_eq!(results.tags.len(), 1);

    let result = global_search(db.pool(), "   ").await;
    assert_matches!(
        result,
        Err(BackendError::SharedError(SharedError::ValidationError { .. }))
    );
}

//! Follow graph and profile integration tests

use assert_matches::assert_matches;
use blogforge::backend::error::BackendError;
use blogforge::backend::social::{
    follow, get_profile, list_followers, list_following, search_users, unfollow, update_profile,
};
use blogforge::shared::blog::{PostStatus, UpdateProfileRequest};
use crate::common::*;

#[tokio::test]
async fn test_follow_round_trip() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;

    assert!(follow(db.pool(), alice.user_id, bob.user_id).await.unwrap());
    assert!(follow(db.pool(), alice.user_id, bob.user_id).await.unwrap());

    let followers = list_followers(db.pool(), bob.user_id).await.unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].username, "alice");
    assert!(list_following(db.pool(), bob.user_id).await.unwrap().is_empty());

    assert!(!unfollow(db.pool(), alice.user_id, bob.user_id).await.unwrap());
    assert!(!unfollow(db.pool(), alice.user_id, bob.user_id).await.unwrap());
    assert!(list_followers(db.pool(), bob.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_errors() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;

    let result = follow(db.pool(), alice.user_id, alice.user_id).await;
    assert_matches!(result, Err(BackendError::Conflict { .. }));

    let result = follow(db.pool(), alice.user_id, 77).await;
    assert_matches!(result, Err(BackendError::NotFound { entity: "user", id: 77 }));

    let result = list_followers(db.pool(), 77).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_profile_counts_are_live() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    let bob = create_test_user(&db, "bob").await;
    let carol = create_test_user(&db, "carol").await;
    create_test_post(&db, alice, "One", &[]).await;
    create_test_post(&db, alice, "Two", &[]).await;
    create_post_with_status(&db, alice, "Hidden", &[], PostStatus::Hidden).await;

    follow(db.pool(), bob.user_id, alice.user_id).await.unwrap();
    follow(db.pool(), carol.user_id, alice.user_id).await.unwrap();
    follow(db.pool(), alice.user_id, carol.user_id).await.unwrap();

    let seen_by_bob = get_profile(db.pool(), alice.user_id, Some(bob.user_id))
        .await
        .unwrap();
    assert_eq!(seen_by_bob.post_count, 2);
    assert_eq!(seen_by_bob.follower_count, 2);
    assert_eq!(seen_by_bob.following_count, 1);
    assert!(seen_by_bob.is_following);

    unfollow(db.pool(), bob.user_id, alice.user_id).await.unwrap();
    let anonymous = get_profile(db.pool(), alice.user_id, None).await.unwrap();
    assert_eq!(anonymous.follower_count, 1);
    assert!(!anonymous.is_following);

    let result = get_profile(db.pool(), 999, None).await;
    assert_matches!(result, Err(BackendError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_profile() {
    let db = TestDatabase::new().await;
    let alice = create_test_user(&db, "alice").await;
    create_test_user(&db, "bob").await;

    let request = UpdateProfileRequest {
        email: "alice@new.example".to_string(),
        avatar: Some("/avatars/alice.png".to_string()),
    };
    let user = update_profile(db.pool(), alice.user_id, &request).await.unwrap();
    assert_eq!(user.email, "alice@new.example");
    assert_eq!(user.avatar.as_deref(), Some("/avatars/alice.png"));

    // Absent avatar keeps the current one
    let request = UpdateProfileRequest {
        email: "alice@other.example".to_string(),
        avatar: None,
    };
    let user = update_profile(db.pool(), alice.user_id, &request).await.unwrap();
    assert_eq!(user.avatar.as_deref(), Some("/avatars/alice.png"));

    let taken = UpdateProfileRequest {
        email: "bob@example.com".to_string(),
        avatar: None,
    };
    let result = update_profile(db.pool(), alice.user_id, &taken).await;
    assert_matches!(result, Err(BackendError::Conflict { .. }));
}

#[tokio::test]
async fn test_search_users() {
    let db = TestDatabase::new().await;
    create_test_user(&db, "Alice").await;
    create_test_user(&db, "malice").await;
    create_test_user(&db, "bob").await;

    let found = search_users(db.pool(), "ALI", 10).await.unwrap();
    let names: Vec<&str> = found.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["Alice", "malice"]);

    assert_eq!(search_users(db.pool(), "ali", 1).await.unwrap().len(), 1);
}

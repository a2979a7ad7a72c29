//! User, post and token helpers

use blogforge::backend::auth::sessions::create_token;
use blogforge::backend::auth::users::{create_user, set_role};
use blogforge::backend::posts::db::create_post;
use blogforge::shared::blog::{Actor, CreatePostRequest, Post, PostStatus, Role};

use super::database::{TestDatabase, TEST_JWT_SECRET};

/// Password of every user created by [`create_test_user`]
pub const TEST_PASSWORD: &str = "password123";

/// Create a regular user named `username` and return its actor
pub async fn create_test_user(db: &TestDatabase, username: &str) -> Actor {
    let hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash password");
    let user = create_user(
        db.pool(),
        username,
        &format!("{}@example.com", username),
        &hash,
    )
    .await
    .expect("Failed to create test user");
    Actor::new(user.id, Role::User)
}

/// Create an admin named `username` and return its actor
pub async fn create_test_admin(db: &TestDatabase, username: &str) -> Actor {
    let user = create_test_user(db, username).await;
    set_role(db.pool(), user.user_id, Role::Admin)
        .await
        .expect("Failed to promote test user");
    Actor::new(user.user_id, Role::Admin)
}

/// Create a published post by `author`
pub async fn create_test_post(db: &TestDatabase, author: Actor, title: &str, tags: &[&str]) -> Post {
    create_post_with_status(db, author, title, tags, PostStatus::Published).await
}

pub async fn create_post_with_status(
    db: &TestDatabase,
    author: Actor,
    title: &str,
    tags: &[&str],
    status: PostStatus,
) -> Post {
    let request = CreatePostRequest {
        title: title.to_string(),
        content: format!("Body of {}", title),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status: Some(status),
    };
    create_post(db.pool(), author, &request)
        .await
        .expect("Failed to create test post")
}

/// Bearer token for `actor`
pub fn token_for(actor: Actor) -> String {
    create_token(actor.user_id, actor.role, TEST_JWT_SECRET, 1).expect("Failed to create token")
}

//! Property-based tests for engagement toggles and request clamping

use std::collections::HashSet;

use blogforge::backend::posts::counters::{engagement, toggle_favorite, toggle_like};
use blogforge::backend::posts::db::fetch_post;
use blogforge::backend::posts::handlers::{page_params, MAX_PAGE_SIZE};
use blogforge::shared::blog::notification::EXCERPT_LEN;
use blogforge::shared::blog::excerpt;
use crate::common::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Toggle {
    Like(usize),
    Favorite(usize),
}

fn toggle_strategy() -> impl Strategy<Value = Toggle> {
    prop_oneof![
        (0usize..3).prop_map(Toggle::Like),
        (0usize..3).prop_map(Toggle::Favorite),
    ]
}

/// Replay `toggles` against a fresh database and compare with a set model
/// after every step.
async fn replay(toggles: Vec<Toggle>) -> Result<(), TestCaseError> {
    let db = TestDatabase::new().await;
    let author = create_test_user(&db, "author").await;
    let post = create_test_post(&db, author, "Toggled", &[]).await;
    let mut users = Vec::new();
    for name in ["u0", "u1", "u2"] {
        users.push(create_test_user(&db, name).await.user_id);
    }

    let mut likes = HashSet::new();
    let mut favorites = HashSet::new();

    for toggle in toggles {
        let (active, expected) = match toggle {
            Toggle::Like(i) => {
                let active = toggle_like(db.pool(), users[i], post.id).await.unwrap();
                (active, likes.insert(users[i]) || !likes.remove(&users[i]))
            }
            Toggle::Favorite(i) => {
                let active = toggle_favorite(db.pool(), users[i], post.id).await.unwrap();
                (active, favorites.insert(users[i]) || !favorites.remove(&users[i]))
            }
        };
        prop_assert_eq!(active, expected);

        let state = engagement(db.pool(), post.id, None).await.unwrap();
        prop_assert_eq!(state.like_count, likes.len() as i64);
        prop_assert_eq!(state.favorite_count, favorites.len() as i64);
    }

    let stored = fetch_post(db.pool(), post.id).await.unwrap().unwrap();
    prop_assert_eq!(stored.like_count, likes.len() as i64);
    prop_assert_eq!(stored.favorite_count, favorites.len() as i64);

    for (i, user) in users.iter().enumerate() {
        let seen = engagement(db.pool(), post.id, Some(*user)).await.unwrap();
        prop_assert_eq!(seen.liked, likes.contains(user), "user {}", i);
        prop_assert_eq!(seen.favorited, favorites.contains(user), "user {}", i);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn test_toggles_match_set_model(toggles in prop::collection::vec(toggle_strategy(), 0..12)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(replay(toggles))?;
    }
}

proptest! {
    #[test]
    fn test_page_params_always_in_range(
        page in proptest::option::of(any::<i64>()),
        page_size in proptest::option::of(any::<i64>()),
    ) {
        let (page, page_size) = page_params(page, page_size, 10);
        prop_assert!(page >= 1);
        prop_assert!((1..=MAX_PAGE_SIZE).contains(&page_size));
    }

    #[test]
    fn test_excerpt_is_bounded_prefix(content in "\\PC{0,150}") {
        let short = excerpt(&content);
        let count = content.chars().count();
        if count <= EXCERPT_LEN {
            prop_assert_eq!(short, content);
        } else {
            prop_assert_eq!(short.chars().count(), EXCERPT_LEN + 1);
            prop_assert!(short.ends_with('…'));
            prop_assert!(content.starts_with(short.trim_end_matches('…')));
        }
    }
}

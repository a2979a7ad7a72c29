//! Engagement counters
//!
//! Like, favorite and comment counts are never stored. Every read computes
//! them from the edge tables and the live comment set, so a count always
//! equals the size of the relation it describes.

use sqlx::SqlitePool;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::graph::{self, store::entity_exists, Direction, Entity, Relation};
use crate::backend::query::begin_write;
use crate::shared::blog::Engagement;

/// Projection of the three live counters for a post aliased `p`
pub const POST_COUNTERS: &str = "\
    (SELECT COUNT(*) FROM user_likes l WHERE l.post_id = p.id) AS like_count, \
    (SELECT COUNT(*) FROM user_favorites f WHERE f.post_id = p.id) AS favorite_count, \
    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id AND c.deleted_at IS NULL) AS comment_count";

/// Flip the `user -> post` like edge.
///
/// # Returns
///
/// `true` when the post is liked after the call.
///
/// # Errors
///
/// * `NotFound` - the user or the post does not exist
pub async fn toggle_like(pool: &SqlitePool, user_id: i64, post_id: i64) -> BackendResult<bool> {
    toggle_edge(pool, Relation::Like, user_id, post_id).await
}

/// Flip the `user -> post` favorite edge. See [`toggle_like`].
pub async fn toggle_favorite(
    pool: &SqlitePool,
    user_id: i64,
    post_id: i64,
) -> BackendResult<bool> {
    toggle_edge(pool, Relation::Favorite, user_id, post_id).await
}

/// Remove the edge if present, otherwise add it; never both.
///
/// Both steps run in one write transaction, so concurrent toggles are
/// serialized by the store and each one observes the previous result.
async fn toggle_edge(
    pool: &SqlitePool,
    relation: Relation,
    source: i64,
    target: i64,
) -> BackendResult<bool> {
    let mut tx = begin_write(pool).await?;
    let active = if graph::remove_edge(&mut tx, relation, source, target).await? {
        false
    } else {
        graph::add_edge(&mut tx, relation, source, target).await?;
        true
    };
    tx.commit().await?;

    tracing::info!(
        "User {} {} post {}",
        source,
        match (relation, active) {
            (Relation::Like, true) => "liked",
            (Relation::Like, false) => "unliked",
            (_, true) => "favorited",
            (_, false) => "unfavorited",
        },
        target
    );
    Ok(active)
}

/// Like and favorite state of a post.
///
/// `liked`/`favorited` are false for anonymous viewers.
///
/// # Errors
///
/// * `NotFound` - the post does not exist
pub async fn engagement(
    pool: &SqlitePool,
    post_id: i64,
    viewer: Option<i64>,
) -> BackendResult<Engagement> {
    let mut conn = pool.acquire().await?;
    if !entity_exists(&mut conn, Entity::Post, post_id).await? {
        return Err(BackendError::not_found("post", post_id));
    }

    let like_count =
        graph::count_edges(&mut conn, Relation::Like, post_id, Direction::Incoming).await?;
    let favorite_count =
        graph::count_edges(&mut conn, Relation::Favorite, post_id, Direction::Incoming).await?;

    let (liked, favorited) = match viewer {
        Some(user_id) => (
            graph::has_edge(&mut conn, Relation::Like, user_id, post_id).await?,
            graph::has_edge(&mut conn, Relation::Favorite, user_id, post_id).await?,
        ),
        None => (false, false),
    };

    Ok(Engagement {
        like_count,
        favorite_count,
        liked,
        favorited,
    })
}

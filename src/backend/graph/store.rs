//! Edge set operations
//!
//! One implementation serves every [`Relation`]. Edges have set semantics:
//! adding an existing edge or removing a missing one is a no-op that reports
//! `false`. An edge never points at a missing entity.
//!
//! Every function runs on the connection it is given, which may sit inside
//! the caller's transaction. Writes are single statements that lead with
//! the write itself; endpoint checks only run when nothing was written, to
//! tell a no-op from a missing entity.

use chrono::Utc;
use sqlx::SqliteConnection;

use super::relation::{Direction, Entity, Relation};
use crate::backend::error::{BackendError, BackendResult};

/// Check whether an entity row exists
pub(crate) async fn entity_exists(
    conn: &mut SqliteConnection,
    entity: Entity,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", entity.table());
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

async fn ensure_endpoints(
    conn: &mut SqliteConnection,
    relation: Relation,
    source: i64,
    target: i64,
) -> BackendResult<()> {
    if !entity_exists(&mut *conn, relation.source(), source).await? {
        return Err(BackendError::not_found(relation.source().name(), source));
    }
    if !entity_exists(&mut *conn, relation.target(), target).await? {
        return Err(BackendError::not_found(relation.target().name(), target));
    }
    Ok(())
}

/// Test whether the edge `source -> target` exists
pub async fn has_edge(
    conn: &mut SqliteConnection,
    relation: Relation,
    source: i64,
    target: i64,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ? AND {} = ?",
        relation.table(),
        relation.source_column(),
        relation.target_column()
    );
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(source)
        .bind(target)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

/// Add the edge `source -> target`.
///
/// # Returns
///
/// `true` when the edge was created, `false` when it already existed.
///
/// # Errors
///
/// * `Conflict` - a self-referential relation would loop (self-follow)
/// * `NotFound` - either endpoint is missing; nothing is written
pub async fn add_edge(
    conn: &mut SqliteConnection,
    relation: Relation,
    source: i64,
    target: i64,
) -> BackendResult<bool> {
    if relation.is_self_referential() && source == target {
        return Err(match relation {
            Relation::Follow => BackendError::conflict("cannot follow yourself"),
            _ => BackendError::conflict(format!(
                "{} edge cannot point at itself",
                relation.as_str()
            )),
        });
    }

    // The WHERE clause also keeps the upsert parseable after INSERT ... SELECT.
    let sql = format!(
        "INSERT INTO {table} ({src}, {dst}, created_at) \
         SELECT ?, ?, ? \
         WHERE EXISTS (SELECT 1 FROM {src_table} WHERE id = ?) \
           AND EXISTS (SELECT 1 FROM {dst_table} WHERE id = ?) \
         ON CONFLICT DO NOTHING",
        table = relation.table(),
        src = relation.source_column(),
        dst = relation.target_column(),
        src_table = relation.source().table(),
        dst_table = relation.target().table(),
    );
    let result = sqlx::query(&sql)
        .bind(source)
        .bind(target)
        .bind(Utc::now())
        .bind(source)
        .bind(target)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() > 0 {
        return Ok(true);
    }

    ensure_endpoints(conn, relation, source, target).await?;
    tracing::debug!(
        "{} edge {} -> {} already present",
        relation.as_str(),
        source,
        target
    );
    Ok(false)
}

/// Remove the edge `source -> target`.
///
/// # Returns
///
/// `true` when an edge was removed, `false` when there was none.
///
/// # Errors
///
/// * `NotFound` - either endpoint is missing
pub async fn remove_edge(
    conn: &mut SqliteConnection,
    relation: Relation,
    source: i64,
    target: i64,
) -> BackendResult<bool> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ? AND {} = ?",
        relation.table(),
        relation.source_column(),
        relation.target_column()
    );
    let result = sqlx::query(&sql)
        .bind(source)
        .bind(target)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() > 0 {
        return Ok(true);
    }

    ensure_endpoints(conn, relation, source, target).await?;
    Ok(false)
}

/// Count edges touching `key` on the side given by `direction`
pub async fn count_edges(
    conn: &mut SqliteConnection,
    relation: Relation,
    key: i64,
    direction: Direction,
) -> Result<i64, sqlx::Error> {
    let (key_column, _) = relation.columns(direction);
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        relation.table(),
        key_column
    );
    sqlx::query_scalar(&sql)
        .bind(key)
        .fetch_one(&mut *conn)
        .await
}

/// Identities related to `key`, most recently linked first
pub async fn list_related(
    conn: &mut SqliteConnection,
    relation: Relation,
    key: i64,
    direction: Direction,
) -> Result<Vec<i64>, sqlx::Error> {
    let (key_column, related_column) = relation.columns(direction);
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ? ORDER BY created_at DESC, rowid DESC",
        related_column,
        relation.table(),
        key_column
    );
    sqlx::query_scalar(&sql)
        .bind(key)
        .fetch_all(&mut *conn)
        .await
}

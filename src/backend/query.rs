//! Query helpers shared by the persistence modules

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::shared::blog::UserSummary;

/// Begin a transaction that holds the database write lock from its first
/// statement.
///
/// A deferred transaction that reads before it writes cannot wait for a
/// concurrent writer: SQLite fails the lock upgrade with `SQLITE_BUSY`
/// instead of calling the busy handler. Every read-then-write transaction
/// goes through here.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Case-folded form of searchable text, stored in the `*_folded` columns.
///
/// SQLite's `LIKE` and `lower()` only fold ASCII, so folding happens here
/// with full Unicode rules on both the stored text and the keyword.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Build a `LIKE` pattern matching `keyword` as a case-folded substring.
///
/// Match it against a `*_folded` column. `%`, `_` and `\` in the keyword
/// match literally; queries using the pattern must declare `ESCAPE '\'`.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in fold_case(keyword).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Read a [`UserSummary`] from columns `{prefix}id`, `{prefix}username`
/// and `{prefix}avatar`
pub fn user_summary_from_row(row: &SqliteRow, prefix: &str) -> Result<UserSummary, sqlx::Error> {
    Ok(UserSummary {
        id: row.try_get(format!("{}id", prefix).as_str())?,
        username: row.try_get(format!("{}username", prefix).as_str())?,
        avatar: row.try_get(format!("{}avatar", prefix).as_str())?,
    })
}

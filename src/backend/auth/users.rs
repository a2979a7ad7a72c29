/**
 * User Model and Database Operations
 *
 * This module handles user rows and the lookups used by authentication and
 * by the listings that embed user summaries.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::backend::query::{fold_case, user_summary_from_row};
use crate::shared::blog::{Role, User, UserSummary};

/// User row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    /// Unique user ID
    pub id: i64,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// `user` or `admin`
    pub role: String,
    /// Avatar locator
    pub avatar: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Stored role; unknown values fall back to the least privileged role
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or_default()
    }

    /// Public representation without the password hash
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, role, avatar, created_at, updated_at";

/// Create a new user with the `user` role
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error (a UNIQUE violation when the username or email is taken)
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRecord, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, UserRecord>(&format!(
        r#"
        INSERT INTO users (username, username_folded, email, password_hash, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(username)
    .bind(fold_case(username))
    .bind(email)
    .bind(password_hash)
    .bind(Role::User.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {} FROM users WHERE username = ?",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {} FROM users WHERE id = ?",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Change the role of a user
///
/// # Returns
/// `true` when the user exists
pub async fn set_role(pool: &SqlitePool, id: i64, role: Role) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// User summaries for `ids`, in the order of `ids`.
///
/// Ids without a user are skipped.
pub async fn get_user_summaries(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<UserSummary>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, username, avatar FROM users WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = builder.build().fetch_all(pool).await?;
    let mut by_id = HashMap::with_capacity(rows.len());
    for row in &rows {
        let summary = user_summary_from_row(row, "")?;
        by_id.insert(summary.id, summary);
    }

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

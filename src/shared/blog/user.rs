//! User Data Structures
//!
//! Public user representations and the authenticated actor identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Role of a user account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Identity of the user performing a request.
///
/// Supplied by the auth layer after the session token has been verified.
/// Core operations only run authorization checks against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the actor owns the resource or is an admin
    pub fn can_manage(&self, owner_id: i64) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

/// Compact user reference embedded in posts, comments and notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub avatar: Option<String>,
}

/// Account details visible to the account owner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public profile with live relation counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
    pub follower_count: i64,
    pub following_count: i64,
    /// Whether the viewing user follows this profile (false when anonymous)
    pub is_following: bool,
}

/// Request to update the caller's own profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    /// Avatar locator; left unchanged when absent
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_email(&self.email)?;
        if let Some(avatar) = &self.avatar {
            SharedError::check_length("avatar", avatar, 1, 500)?;
        }
        Ok(())
    }
}

/// Username: 3-30 characters, starts with a letter, `[A-Za-z0-9_]` only
pub fn validate_username(username: &str) -> Result<(), SharedError> {
    SharedError::check_length("username", username, 3, 30)?;
    let mut chars = username.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(SharedError::validation(
            "username",
            "username must start with a letter",
        ));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SharedError::validation(
            "username",
            "username may only contain letters, digits and underscores",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), SharedError> {
    SharedError::check_length("email", email, 3, 254)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SharedError::validation("email", "invalid email format")),
    }
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < 8 {
        return Err(SharedError::validation(
            "password",
            "password must be at least 8 characters",
        ));
    }
    Ok(())
}

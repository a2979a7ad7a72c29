//! Social graph
//!
//! - **`follow`** - follow/unfollow and follower listings
//! - **`profile`** - public profiles, profile updates, user search
//! - **`handlers`** - HTTP handlers

pub mod follow;
pub mod handlers;
pub mod profile;

pub use follow::{follow, list_followers, list_following, unfollow};
pub use profile::{get_profile, search_users, update_profile};

//! Posts
//!
//! - **`db`** - post persistence, pins, liked/favorite listings
//! - **`feed`** - filtered, paginated, two-tier ordered listings
//! - **`counters`** - live engagement counters and like/favorite toggles
//! - **`handlers`** - HTTP handlers

pub mod counters;
pub mod db;
pub mod feed;
pub mod handlers;

pub use feed::{FeedQuery, StatusFilter};

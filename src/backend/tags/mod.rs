//! Tags
//!
//! - **`resolver`** - find-or-create of tag names, post tag-set replacement
//! - **`db`** - tag listings and per-post tag lookup
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;
pub mod resolver;

pub use resolver::{replace_post_tags, resolve_tags};

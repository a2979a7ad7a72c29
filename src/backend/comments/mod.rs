//! Comments
//!
//! - **`thread`** - two-level thread assembly with reply-to attribution
//! - **`db`** - creation with reference checks, soft deletion, listings
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;
pub mod thread;

pub use thread::build_thread;

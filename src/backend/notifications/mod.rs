//! Notifications
//!
//! Notifications are only ever created by [`fanout`] as a side effect of a
//! new comment. Clients can read them and flip their read flag.

pub mod db;
pub mod fanout;
pub mod handlers;

pub use fanout::{notify_comment, select_recipient, CommentTargets};

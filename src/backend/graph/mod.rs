//! Relationship store
//!
//! Generic many-to-many edge sets: follows, likes, favorites and post tags.

pub mod relation;
pub mod store;

pub use relation::{Direction, Entity, Relation};
pub use store::{add_edge, count_edges, has_edge, list_related, remove_edge};

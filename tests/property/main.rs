//! Property-based test suite

#[path = "../common/mod.rs"]
mod common;

mod toggle_proptest;

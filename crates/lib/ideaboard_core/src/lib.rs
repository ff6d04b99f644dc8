//! # ideaboard_core
//!
//! Core domain logic for Ideaboard.

pub mod auth;
pub mod github;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

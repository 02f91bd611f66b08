//! Dry-run request construction for the Crustdata screener API.
//!
//! This crate builds immutable request descriptors (method, URL, headers, body)
//! and renders them as human-readable previews. It never opens a connection:
//! the server built on top of it exists to show an agent what *would* be sent.

pub mod config;
pub mod render;
pub mod request;

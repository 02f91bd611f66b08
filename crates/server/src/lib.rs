//! Dry-run MCP server for the Crustdata screener API.
//!
//! Every tool validates its structured input, assembles the request the
//! Crustdata API would receive, and returns a rendered preview instead of
//! calling out. See `crustdata-dryrun` for the descriptor/renderer layer.

pub mod error;
pub mod server;
pub mod tools;

mod validate;

//! Error types for the MCP server.

use rmcp::model::ErrorData;
use serde_json::json;
use thiserror::Error;

/// Input validation failures surfaced to MCP callers.
///
/// Each variant names the offending field and the violated constraint; there
/// are no other failure modes in a dry-run server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{field}' must contain at least {min} item(s)")]
    TooFewItems { field: &'static str, min: usize },

    #[error("'{field}' must contain at most {max} items, got {got}")]
    TooManyItems {
        field: &'static str,
        max: usize,
        got: usize,
    },

    #[error("'{field}' must be at least {min}, got {got}")]
    BelowMinimum {
        field: &'static str,
        min: u64,
        got: u64,
    },

    #[error("'{field}' must be between {min} and {max}, got {got}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
        got: u64,
    },

    #[error("'{field}' cannot be combined with '{other}'")]
    Conflict {
        field: &'static str,
        other: &'static str,
    },
}

impl InputError {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::TooFewItems { field, .. }
            | Self::TooManyItems { field, .. }
            | Self::BelowMinimum { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Conflict { field, .. } => field,
        }
    }
}

impl From<InputError> for ErrorData {
    fn from(err: InputError) -> Self {
        let field = err.field();
        ErrorData::invalid_params(err.to_string(), Some(json!({ "field": field })))
    }
}

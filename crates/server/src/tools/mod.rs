//! Tool input types and request mappings, one module per API domain.
//!
//! The field names these modules send to the API are a compatibility contract
//! with existing callers; do not rename them.

pub mod company;
pub mod people;
pub mod ping;

/// Join list items with commas, trimming surrounding whitespace per item.
pub(crate) fn join_trimmed(items: &[String]) -> String {
    items
        .iter()
        .map(|item| item.trim())
        .collect::<Vec<_>>()
        .join(",")
}

/// Treat empty and whitespace-only strings as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

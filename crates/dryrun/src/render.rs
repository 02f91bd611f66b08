//! Dry-run preview rendering.
//!
//! Deterministic, multi-line, human-readable. Never performs I/O.

use std::fmt;

use serde::Serialize as _;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::request::DryRunRequest;

impl DryRunRequest {
    /// Render the preview text returned to callers.
    ///
    /// The `Body:` section is emitted only when the body is non-empty; a POST
    /// assembled from all-default inputs still previews its `Content-Type`
    /// header but has nothing to print below it.
    #[must_use]
    pub fn render(&self) -> String {
        let headers = self
            .headers()
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = vec![
            "Dry run mode - no actual API call was made.".to_string(),
            String::new(),
            "Request that would be sent:".to_string(),
            format!("  Method:  {}", self.method()),
            format!("  URL:     {}", self.url()),
            format!("  Headers: {headers}"),
        ];

        if let Some(body) = self.body().filter(|b| !body_is_empty(b)) {
            lines.push("  Body:".to_string());
            for line in pretty_json(body).lines() {
                lines.push(format!("    {line}"));
            }
        }

        lines.join("\n")
    }
}

impl fmt::Display for DryRunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn body_is_empty(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Pretty-print with a four-space indent.
fn pretty_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}

//! Request descriptor builder.
//!
//! A [`DryRunRequest`] is the immutable description of an HTTP request that
//! would be issued: method, fully assembled URL, ordered headers, optional JSON
//! body. Construction goes through [`RequestBuilder`]; callers validate their
//! inputs first, so building never fails and never touches the network.

use http::Method;
use serde_json::Value;

use crate::config::ApiConfig;

const ACCEPT: &str = "application/json";
const CONTENT_TYPE_JSON: &str = "application/json";

/// Placeholder credential rendered into previews. A real token never enters
/// this process.
const AUTHORIZATION: &str = "Token $token";

/// Immutable descriptor of a request that would be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct DryRunRequest {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl DryRunRequest {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Assembles a [`DryRunRequest`] against a configured base URL.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    config: &'a ApiConfig,
    method: Method,
    path: &'a str,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl<'a> RequestBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a ApiConfig, method: Method, path: &'a str) -> Self {
        Self {
            config,
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter. Order of calls is the order in the URL.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl std::fmt::Display) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query parameter only when a value is present. Absent
    /// parameters never appear in the URL.
    #[must_use]
    pub fn query_opt(self, key: &str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Attach a JSON body. Also causes `Content-Type` to be set on build.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn build(self) -> DryRunRequest {
        let mut url = String::with_capacity(self.config.base_url().len() + self.path.len());
        url.push_str(self.config.base_url());
        if !self.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(self.path);

        if !self.query.is_empty() {
            url.push('?');
            for (i, (key, value)) in self.query.iter().enumerate() {
                if i > 0 {
                    url.push('&');
                }
                url.push_str(&encode_query_component(key));
                url.push('=');
                url.push_str(&encode_query_component(value));
            }
        }

        let mut headers = vec![
            ("Accept".to_string(), ACCEPT.to_string()),
            ("Authorization".to_string(), AUTHORIZATION.to_string()),
        ];
        if self.body.is_some() {
            headers.push(("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()));
        }

        DryRunRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        }
    }
}

fn encode_query_component(s: &str) -> String {
    // NOTE: also encodes '&' and '=' to avoid breaking our own query-string joining.
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

fn is_unreserved(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ApiConfig {
        ApiConfig::default()
    }

    #[test]
    fn build_joins_path_to_base_url() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "/screener/company").build();
        assert_eq!(request.url(), "https://api.crustdata.com/screener/company");
        assert_eq!(request.method(), &Method::GET);
    }

    #[test]
    fn build_normalizes_missing_leading_slash() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "screener/company").build();
        assert_eq!(request.url(), "https://api.crustdata.com/screener/company");
    }

    #[test]
    fn query_parameters_keep_insertion_order() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "/screener/linkedin_posts")
            .query("page", 1)
            .query("limit", 10)
            .build();
        assert!(request.url().ends_with("?page=1&limit=10"));
    }

    #[test]
    fn absent_optional_parameters_are_dropped() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "/screener/company")
            .query("company_domain", "example.com")
            .query_opt("fields", None::<&str>)
            .build();
        assert!(request.url().ends_with("?company_domain=example.com"));
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "/screener/company")
            .query("company_domain", "hubspot.com,google.com")
            .query("q", "a b")
            .build();
        assert!(
            request
                .url()
                .ends_with("?company_domain=hubspot.com%2Cgoogle.com&q=a%20b")
        );
    }

    #[test]
    fn headers_always_include_accept_and_authorization() {
        let cfg = config();
        let request = RequestBuilder::new(&cfg, Method::GET, "/screener/company").build();
        assert_eq!(
            request.headers(),
            &[
                ("Accept".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), "Token $token".to_string()),
            ]
        );
    }

    #[test]
    fn content_type_is_set_only_with_a_body() {
        let cfg = config();
        let without = RequestBuilder::new(&cfg, Method::GET, "/screener/company").build();
        assert!(!without.headers().iter().any(|(k, _)| k == "Content-Type"));

        let with = RequestBuilder::new(&cfg, Method::POST, "/screener/screen/")
            .json(json!({"count": 100}))
            .build();
        assert_eq!(
            with.headers().last(),
            Some(&("Content-Type".to_string(), "application/json".to_string()))
        );
        assert_eq!(with.body(), Some(&json!({"count": 100})));
    }
}

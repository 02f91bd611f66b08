//! Connectivity-check tool.

use crustdata_dryrun::config::ApiConfig;
use crustdata_dryrun::request::{DryRunRequest, RequestBuilder};
use http::Method;

/// Sample dry run returned by the ping tool: the company-enrichment request
/// an agent would typically issue first.
pub fn ping(config: &ApiConfig) -> DryRunRequest {
    RequestBuilder::new(config, Method::GET, "/screener/company")
        .query("company_domain", "example.com")
        .build()
}

//! Company tools: enrichment, screening, and structured search.

use crustdata_dryrun::config::ApiConfig;
use crustdata_dryrun::request::{DryRunRequest, RequestBuilder};
use http::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::InputError;
use crate::tools::join_trimmed;
use crate::validate;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EnrichCompanyInput {
    /// List of company website domains to enrich (e.g. ["hubspot.com", "google.com"]).
    #[schemars(length(min = 1, max = 25))]
    pub company_domains: Vec<String>,
    /// Specific fields to retrieve (e.g. ["company_name", "headcount.headcount"]).
    /// If not specified, returns all top-level non-object fields.
    pub fields: Option<Vec<String>>,
    /// If true, will enrich companies not in the database within 10 minutes.
    #[serde(default)]
    pub enrich_realtime: bool,
}

/// Map validated enrichment input onto GET `/screener/company`.
///
/// Domains (and fields, when given) are comma-joined into single query
/// parameters; the realtime flag serializes as the literal `True` the API
/// expects on this endpoint.
pub fn enrich_company(
    config: &ApiConfig,
    input: &EnrichCompanyInput,
) -> Result<DryRunRequest, InputError> {
    validate::list_size("company_domains", input.company_domains.len(), 1, 25)?;

    let mut builder = RequestBuilder::new(config, Method::GET, "/screener/company")
        .query("company_domain", join_trimmed(&input.company_domains))
        .query_opt(
            "fields",
            input
                .fields
                .as_deref()
                .filter(|fields| !fields.is_empty())
                .map(join_trimmed),
        );
    if input.enrich_realtime {
        builder = builder.query("enrich_realtime", "True");
    }

    Ok(builder.build())
}

/// One screening condition; unknown extra fields pass through to the API
/// unchanged.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ScreeningCondition {
    /// Column name to filter on (e.g. "headcount", "total_investment_usd").
    pub column: String,
    /// Comparison type: "=" for equals, "=>" for gte, "<=" for lte, "(.)" for contains.
    #[serde(rename = "type")]
    pub kind: String,
    /// Value to compare against.
    pub value: Value,
    /// Whether to include null values.
    #[serde(default)]
    pub allow_null: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScreenCompaniesInput {
    /// Logical operator to combine conditions: "and" or "or".
    #[serde(default = "default_op")]
    pub op: String,
    /// List of filter conditions.
    pub conditions: Vec<ScreeningCondition>,
    /// Number of results to skip.
    #[serde(default)]
    pub offset: u32,
    /// Number of results to return.
    #[serde(default = "default_count")]
    #[schemars(range(min = 1, max = 1000))]
    pub count: u32,
    /// Optional sorting criteria.
    pub sorts: Option<Vec<Value>>,
}

fn default_op() -> String {
    "and".to_string()
}

fn default_count() -> u32 {
    100
}

/// Map validated screening input onto POST `/screener/screen/`.
pub fn screen_companies(
    config: &ApiConfig,
    input: &ScreenCompaniesInput,
) -> Result<DryRunRequest, InputError> {
    validate::non_empty("conditions", input.conditions.len())?;
    validate::in_range("count", u64::from(input.count), 1, 1000)?;

    let body = json!({
        "filters": {
            "op": input.op.trim(),
            "conditions": input.conditions,
        },
        "hidden_columns": [],
        "offset": input.offset,
        "count": input.count,
        "sorts": input.sorts.clone().unwrap_or_default(),
    });

    Ok(RequestBuilder::new(config, Method::POST, "/screener/screen/")
        .json(body)
        .build())
}

/// One structured search filter; `sub_filter` is omitted from the body when
/// absent, extras pass through.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CompanySearchFilter {
    /// Filter type (e.g. "COMPANY_HEADCOUNT", "REGION", "INDUSTRY", "ANNUAL_REVENUE").
    pub filter_type: String,
    /// Operation type: "in", "not in", or "between".
    #[serde(rename = "type")]
    pub kind: String,
    /// Filter value(s).
    pub value: Value,
    /// Sub-filter for certain types (e.g. "USD" for ANNUAL_REVENUE).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_filter: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCompaniesInput {
    /// List of search filters (combined with AND logic).
    #[schemars(length(min = 1))]
    pub filters: Vec<CompanySearchFilter>,
    /// Page number for pagination (25 results per page).
    #[serde(default = "default_page")]
    #[schemars(range(min = 1))]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Map validated search input onto POST `/screener/company/search`.
pub fn search_companies(
    config: &ApiConfig,
    input: &SearchCompaniesInput,
) -> Result<DryRunRequest, InputError> {
    validate::non_empty("filters", input.filters.len())?;
    validate::at_least("page", u64::from(input.page), 1)?;

    let body = json!({
        "filters": input.filters,
        "page": input.page,
    });

    Ok(
        RequestBuilder::new(config, Method::POST, "/screener/company/search")
            .json(body)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig::default()
    }

    #[test]
    fn enrich_joins_domains_and_orders_parameters() {
        let input: EnrichCompanyInput = serde_json::from_value(json!({
            "company_domains": ["hubspot.com", " google.com "],
            "fields": ["company_name", "headcount.headcount"],
            "enrich_realtime": true,
        }))
        .expect("valid input");

        let request = enrich_company(&config(), &input).expect("build");
        assert_eq!(
            request.url(),
            "https://api.crustdata.com/screener/company\
             ?company_domain=hubspot.com%2Cgoogle.com\
             &fields=company_name%2Cheadcount.headcount\
             &enrich_realtime=True"
        );
    }

    #[test]
    fn enrich_rejects_oversized_domain_list() {
        let domains: Vec<String> = (0..26).map(|i| format!("c{i}.com")).collect();
        let input = EnrichCompanyInput {
            company_domains: domains,
            fields: None,
            enrich_realtime: false,
        };

        let err = enrich_company(&config(), &input).unwrap_err();
        assert_eq!(err.field(), "company_domains");
        assert!(err.to_string().contains("at most 25"));
    }

    #[test]
    fn screen_builds_the_full_filter_envelope() {
        let input: ScreenCompaniesInput = serde_json::from_value(json!({
            "conditions": [
                {"column": "headcount", "type": "=>", "value": 100}
            ]
        }))
        .expect("valid input");

        let request = screen_companies(&config(), &input).expect("build");
        assert_eq!(request.url(), "https://api.crustdata.com/screener/screen/");
        assert_eq!(
            request.body(),
            Some(&json!({
                "filters": {
                    "op": "and",
                    "conditions": [
                        {"column": "headcount", "type": "=>", "value": 100, "allow_null": false}
                    ],
                },
                "hidden_columns": [],
                "offset": 0,
                "count": 100,
                "sorts": [],
            }))
        );
    }

    #[test]
    fn screen_passes_extra_condition_fields_through() {
        let input: ScreenCompaniesInput = serde_json::from_value(json!({
            "conditions": [
                {"column": "headcount", "type": "=>", "value": 100, "depth": 2}
            ]
        }))
        .expect("valid input");

        let request = screen_companies(&config(), &input).expect("build");
        let conditions = &request.body().expect("body")["filters"]["conditions"];
        assert_eq!(conditions[0]["depth"], json!(2));
    }

    #[test]
    fn screen_rejects_count_out_of_range() {
        let input: ScreenCompaniesInput = serde_json::from_value(json!({
            "conditions": [{"column": "headcount", "type": "=", "value": 1}],
            "count": 5000,
        }))
        .expect("valid input");

        let err = screen_companies(&config(), &input).unwrap_err();
        assert!(err.to_string().contains("between 1 and 1000"));
    }

    #[test]
    fn search_omits_absent_sub_filter() {
        let input: SearchCompaniesInput = serde_json::from_value(json!({
            "filters": [
                {"filter_type": "COMPANY_HEADCOUNT", "type": "in", "value": ["11-50"]}
            ],
            "page": 2,
        }))
        .expect("valid input");

        let request = search_companies(&config(), &input).expect("build");
        let body = request.body().expect("body");
        assert_eq!(body["page"], json!(2));
        assert!(body["filters"][0].get("sub_filter").is_none());
    }
}

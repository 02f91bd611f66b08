//! People tools: person enrichment, LinkedIn post lookup, and people search.

use crustdata_dryrun::config::ApiConfig;
use crustdata_dryrun::request::{DryRunRequest, RequestBuilder};
use http::Method;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::InputError;
use crate::tools::{join_trimmed, non_blank};
use crate::validate;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EnrichPersonInput {
    /// List of LinkedIn profile URLs to enrich.
    #[schemars(length(max = 25))]
    pub linkedin_urls: Option<Vec<String>>,
    /// List of business email addresses to enrich.
    #[schemars(length(max = 25))]
    pub business_emails: Option<Vec<String>>,
    /// If true, performs a real-time search when the data is not found in the
    /// database.
    #[serde(default)]
    pub enrich_realtime: bool,
}

/// Map validated person-enrichment input onto GET `/screener/person/enrich`.
///
/// Providing at least one of `linkedin_urls` / `business_emails` is a
/// documented convention, not an enforced one: a bare request still previews
/// meaningfully.
pub fn enrich_person(
    config: &ApiConfig,
    input: &EnrichPersonInput,
) -> Result<DryRunRequest, InputError> {
    if let Some(urls) = &input.linkedin_urls {
        validate::max_items("linkedin_urls", urls.len(), 25)?;
    }
    if let Some(emails) = &input.business_emails {
        validate::max_items("business_emails", emails.len(), 25)?;
    }

    let mut builder = RequestBuilder::new(config, Method::GET, "/screener/person/enrich")
        .query_opt("linkedin_profile_url", joined_list(&input.linkedin_urls))
        .query_opt("business_email", joined_list(&input.business_emails));
    if input.enrich_realtime {
        builder = builder.query("enrich_realtime", "true");
    }

    Ok(builder.build())
}

fn joined_list(list: &Option<Vec<String>>) -> Option<String> {
    list.as_deref()
        .filter(|items| !items.is_empty())
        .map(join_trimmed)
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetLinkedInPostsInput {
    /// LinkedIn profile URL of the person.
    pub person_linkedin_url: Option<String>,
    /// Name of the company.
    pub company_name: Option<String>,
    /// Domain of the company (without https://).
    pub company_domain: Option<String>,
    /// Crustdata company ID.
    pub company_id: Option<u64>,
    /// LinkedIn URL of the company.
    pub company_linkedin_url: Option<String>,
    /// Comma-separated list of fields to include in the response.
    pub fields: Option<String>,
    /// Page number for pagination.
    #[serde(default = "default_page")]
    #[schemars(range(min = 1))]
    pub page: u32,
    /// Number of posts per page (1-100).
    #[serde(default = "default_post_limit")]
    #[schemars(range(min = 1, max = 100))]
    pub limit: u32,
    /// Comma-separated list of post types to filter.
    pub post_types: Option<String>,
    /// Maximum number of reactors to include per post.
    #[serde(default = "default_engagement_cap")]
    pub max_reactors: u32,
    /// Maximum number of comments to include per post.
    #[serde(default = "default_engagement_cap")]
    pub max_comments: u32,
}

fn default_page() -> u32 {
    1
}

fn default_post_limit() -> u32 {
    10
}

fn default_engagement_cap() -> u32 {
    10
}

/// Map validated post-lookup input onto GET `/screener/linkedin_posts`.
///
/// The query parameter order is fixed (identifiers, then fields, paging,
/// post-type filter, engagement caps) and preserved for compatibility.
pub fn get_linkedin_posts(
    config: &ApiConfig,
    input: &GetLinkedInPostsInput,
) -> Result<DryRunRequest, InputError> {
    validate::at_least("page", u64::from(input.page), 1)?;
    validate::in_range("limit", u64::from(input.limit), 1, 100)?;

    let request = RequestBuilder::new(config, Method::GET, "/screener/linkedin_posts")
        .query_opt(
            "person_linkedin_url",
            non_blank(input.person_linkedin_url.as_deref()),
        )
        .query_opt("company_name", non_blank(input.company_name.as_deref()))
        .query_opt("company_domain", non_blank(input.company_domain.as_deref()))
        .query_opt("company_id", input.company_id)
        .query_opt(
            "company_linkedin_url",
            non_blank(input.company_linkedin_url.as_deref()),
        )
        .query_opt("fields", non_blank(input.fields.as_deref()))
        .query("page", input.page)
        .query("limit", input.limit)
        .query_opt("post_types", non_blank(input.post_types.as_deref()))
        .query("max_reactors", input.max_reactors)
        .query("max_comments", input.max_comments)
        .build();

    Ok(request)
}

/// Extra rules applied after a people search completes; absent fields are
/// omitted from the body, extras pass through.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PostProcessing {
    /// Enforce strict matching on title and company.
    #[serde(default)]
    pub strict_title_and_company_match: bool,
    /// LinkedIn profile URLs to exclude from results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_profiles: Option<Vec<String>>,
    /// Names to exclude from results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One people-search filter; extras pass through.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PersonSearchFilter {
    /// Filter type (e.g. "CURRENT_COMPANY", "CURRENT_TITLE", "SENIORITY_LEVEL", "INDUSTRY").
    pub filter_type: String,
    /// Operation type: "in" or "not in".
    #[serde(rename = "type")]
    pub kind: String,
    /// Filter value(s) as a list.
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchPeopleInput {
    /// List of search filters (combined with AND logic).
    pub filters: Option<Vec<PersonSearchFilter>>,
    /// LinkedIn Sales Navigator search URL from the browser.
    pub linkedin_sales_navigator_search_url: Option<String>,
    /// Page number for pagination (use with filters, mutually exclusive with
    /// limit).
    #[schemars(range(min = 1))]
    pub page: Option<u32>,
    /// Max results to return (sync max 25, async max 10000). Mutually
    /// exclusive with page.
    #[schemars(range(min = 1, max = 10000))]
    pub limit: Option<u32>,
    /// Get a preview of profiles (cannot be used with page).
    #[serde(default)]
    pub preview: bool,
    /// Run the search asynchronously for large result sets (required when
    /// limit > 25).
    #[serde(default)]
    pub background_job: bool,
    /// Job ID to check the status of a background job.
    pub job_id: Option<String>,
    /// Extra rules applied after the search completes.
    pub post_processing: Option<PostProcessing>,
}

/// Map validated people-search input onto POST `/screener/person/search`.
///
/// Body fields appear only when set; boolean flags only when true. `page` is
/// rejected alongside `limit` or `preview`, which the API treats as
/// incompatible.
pub fn search_people(
    config: &ApiConfig,
    input: &SearchPeopleInput,
) -> Result<DryRunRequest, InputError> {
    if let Some(page) = input.page {
        validate::at_least("page", u64::from(page), 1)?;
    }
    if let Some(limit) = input.limit {
        validate::in_range("limit", u64::from(limit), 1, 10_000)?;
    }
    validate::exclusive("page", input.page.is_some(), "limit", input.limit.is_some())?;
    validate::exclusive("page", input.page.is_some(), "preview", input.preview)?;

    let mut body = Map::new();
    if let Some(filters) = input.filters.as_deref().filter(|f| !f.is_empty()) {
        body.insert("filters".to_string(), json!(filters));
    }
    if let Some(url) = non_blank(input.linkedin_sales_navigator_search_url.as_deref()) {
        body.insert("linkedin_sales_navigator_search_url".to_string(), json!(url));
    }
    if let Some(page) = input.page {
        body.insert("page".to_string(), json!(page));
    }
    if let Some(limit) = input.limit {
        body.insert("limit".to_string(), json!(limit));
    }
    if input.preview {
        body.insert("preview".to_string(), json!(true));
    }
    if input.background_job {
        body.insert("background_job".to_string(), json!(true));
    }
    if let Some(job_id) = non_blank(input.job_id.as_deref()) {
        body.insert("job_id".to_string(), json!(job_id));
    }
    if let Some(post_processing) = &input.post_processing {
        body.insert("post_processing".to_string(), json!(post_processing));
    }

    Ok(
        RequestBuilder::new(config, Method::POST, "/screener/person/search")
            .json(Value::Object(body))
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
    fn enrich_person_joins_both_identifier_lists() {
        let input: EnrichPersonInput = serde_json::from_value(json!({
            "linkedin_urls": ["https://www.linkedin.com/in/jane"],
            "business_emails": ["jane@example.com", "j@example.com"],
            "enrich_realtime": true,
        }))
        .expect("valid input");

        let request = enrich_person(&config(), &input).expect("build");
        assert_eq!(
            request.url(),
            "https://api.crustdata.com/screener/person/enrich\
             ?linkedin_profile_url=https%3A%2F%2Fwww.linkedin.com%2Fin%2Fjane\
             &business_email=jane%40example.com%2Cj%40example.com\
             &enrich_realtime=true"
        );
    }

    #[test]
    fn enrich_person_accepts_no_identifiers() {
        let input = EnrichPersonInput {
            linkedin_urls: None,
            business_emails: None,
            enrich_realtime: false,
        };

        let request = enrich_person(&config(), &input).expect("build");
        assert_eq!(
            request.url(),
            "https://api.crustdata.com/screener/person/enrich"
        );
    }

    #[test]
    fn posts_query_parameters_follow_the_fixed_order() {
        let input: GetLinkedInPostsInput = serde_json::from_value(json!({
            "company_domain": "hubspot.com",
            "post_types": "repost,original",
        }))
        .expect("valid input");

        let request = get_linkedin_posts(&config(), &input).expect("build");
        assert_eq!(
            request.url(),
            "https://api.crustdata.com/screener/linkedin_posts\
             ?company_domain=hubspot.com\
             &page=1&limit=10\
             &post_types=repost%2Coriginal\
             &max_reactors=10&max_comments=10"
        );
    }

    #[test]
    fn posts_rejects_limit_out_of_range() {
        let input: GetLinkedInPostsInput =
            serde_json::from_value(json!({ "limit": 500 })).expect("valid input");
        let err = get_linkedin_posts(&config(), &input).unwrap_err();
        assert_eq!(err.field(), "limit");
    }

    #[test]
    fn search_people_builds_only_provided_fields() {
        let input: SearchPeopleInput = serde_json::from_value(json!({
            "filters": [
                {"filter_type": "CURRENT_TITLE", "type": "in", "value": ["engineer"]}
            ],
            "limit": 100,
            "background_job": true,
        }))
        .expect("valid input");

        let request = search_people(&config(), &input).expect("build");
        assert_eq!(
            request.body(),
            Some(&json!({
                "filters": [
                    {"filter_type": "CURRENT_TITLE", "type": "in", "value": ["engineer"]}
                ],
                "limit": 100,
                "background_job": true,
            }))
        );
    }

    #[test]
    fn search_people_rejects_page_with_limit() {
        let input: SearchPeopleInput =
            serde_json::from_value(json!({ "page": 1, "limit": 25 })).expect("valid input");
        let err = search_people(&config(), &input).unwrap_err();
        assert_eq!(
            err,
            InputError::Conflict {
                field: "page",
                other: "limit",
            }
        );
    }

    #[test]
    fn search_people_rejects_preview_with_page() {
        let input: SearchPeopleInput =
            serde_json::from_value(json!({ "page": 2, "preview": true })).expect("valid input");
        let err = search_people(&config(), &input).unwrap_err();
        assert_eq!(
            err,
            InputError::Conflict {
                field: "page",
                other: "preview",
            }
        );
    }

    #[test]
    fn search_people_with_no_input_builds_an_empty_body() {
        let request = search_people(&config(), &SearchPeopleInput::default()).expect("build");
        assert_eq!(request.body(), Some(&json!({})));
        // Renderer suppresses the Body section for an empty object.
        assert!(!request.render().contains("Body:"));
    }
}

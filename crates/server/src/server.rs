//! MCP server surface: one dry-run tool per Crustdata screener endpoint.
//!
//! Handlers stay thin: validate + map in `tools::*`, render, wrap as MCP text
//! content. Every tool is annotated read-only/idempotent/non-destructive
//! because no previewed method is ever executed.

use std::sync::Arc;

use crustdata_dryrun::config::ApiConfig;
use crustdata_dryrun::request::DryRunRequest;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, ErrorData, Implementation, ProtocolVersion, ServerCapabilities,
    ServerInfo,
};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::tools::{company, people, ping};

/// MCP handler exposing the Crustdata screener tool set.
#[derive(Clone)]
pub struct ScreenerServer {
    config: Arc<ApiConfig>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ScreenerServer {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "crustdata_enrich_company",
        description = "Enrich company data by domain. Retrieves detailed information about one or \
                       more companies (headcount metrics, funding, reviews, web traffic, job \
                       openings, news). Accepts up to 25 domains like 'hubspot.com' or \
                       'stripe.com', an optional list of fields such as 'company_name' or \
                       'headcount.headcount', and an enrich_realtime flag for companies not yet \
                       in the database. Returns a dry-run preview of the request that would be \
                       sent to the Crustdata API.",
        annotations(
            title = "Enrich Company",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn enrich_company(
        &self,
        Parameters(input): Parameters<company::EnrichCompanyInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = company::enrich_company(&self.config, &input)?;
        Ok(dry_run_result("crustdata_enrich_company", &request))
    }

    #[tool(
        name = "crustdata_screen_companies",
        description = "Screen and filter companies on growth and firmographic criteria. Combines \
                       conditions on columns like 'headcount', 'total_investment_usd', \
                       'largest_headcount_country' or 'employee_skills_31_to_50_pct' with 'and' \
                       or 'or'. Condition types: '=' equals, '=>' gte, '<=' lte, '(.)' contains. \
                       Supports offset/count pagination (count up to 1000) and optional sorts. \
                       Returns a dry-run preview of the request that would be sent.",
        annotations(
            title = "Screen Companies",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn screen_companies(
        &self,
        Parameters(input): Parameters<company::ScreenCompaniesInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = company::screen_companies(&self.config, &input)?;
        Ok(dry_run_result("crustdata_screen_companies", &request))
    }

    #[tool(
        name = "crustdata_search_companies",
        description = "Search for companies using structured filters (a different format from \
                       screening), combined with AND logic, 25 results per page. Filter types \
                       include COMPANY_HEADCOUNT (ranges like '11-50'), REGION, INDUSTRY, \
                       ANNUAL_REVENUE ('between' with sub_filter 'USD'), ACCOUNT_ACTIVITIES, \
                       FORTUNE and JOB_OPPORTUNITIES. Returns a dry-run preview of the request \
                       that would be sent.",
        annotations(
            title = "Search Companies",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn search_companies(
        &self,
        Parameters(input): Parameters<company::SearchCompaniesInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = company::search_companies(&self.config, &input)?;
        Ok(dry_run_result("crustdata_search_companies", &request))
    }

    #[tool(
        name = "crustdata_enrich_person",
        description = "Enrich person data using LinkedIn profile URLs or business email \
                       addresses (up to 25 of each; provide at least one of the two). Retrieves \
                       employment history, education, skills and connections. Set \
                       enrich_realtime to search the web when a profile is not in the database. \
                       Returns a dry-run preview of the request that would be sent.",
        annotations(
            title = "Enrich Person",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn enrich_person(
        &self,
        Parameters(input): Parameters<people::EnrichPersonInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = people::enrich_person(&self.config, &input)?;
        Ok(dry_run_result("crustdata_enrich_person", &request))
    }

    #[tool(
        name = "crustdata_get_linkedin_posts",
        description = "Get recent LinkedIn posts and engagement metrics for a person or company. \
                       Identify the subject by person_linkedin_url, company_name, \
                       company_domain, company_id or company_linkedin_url (at least one). \
                       Supports page/limit pagination (up to 100 posts per page), a post_types \
                       filter, and caps on reactors and comments returned per post. Returns a \
                       dry-run preview of the request that would be sent.",
        annotations(
            title = "Get LinkedIn Posts",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn get_linkedin_posts(
        &self,
        Parameters(input): Parameters<people::GetLinkedInPostsInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = people::get_linkedin_posts(&self.config, &input)?;
        Ok(dry_run_result("crustdata_get_linkedin_posts", &request))
    }

    #[tool(
        name = "crustdata_search_people",
        description = "Search professional profiles by filters (CURRENT_COMPANY, CURRENT_TITLE, \
                       SENIORITY_LEVEL, INDUSTRY, REGION, KEYWORD, ...) or by a LinkedIn Sales \
                       Navigator search URL. page and limit are mutually exclusive; preview \
                       cannot be combined with page; background_job runs large searches \
                       asynchronously and job_id checks on one. post_processing can exclude \
                       profiles or names and enforce strict title/company matching. Returns a \
                       dry-run preview of the request that would be sent.",
        annotations(
            title = "Search People",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn search_people(
        &self,
        Parameters(input): Parameters<people::SearchPeopleInput>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = people::search_people(&self.config, &input)?;
        Ok(dry_run_result("crustdata_search_people", &request))
    }

    #[tool(
        name = "crustdata_ping",
        description = "Verify the server is running. Returns a sample dry-run preview of a \
                       company enrichment request.",
        annotations(
            title = "Ping Crustdata",
            read_only_hint = true,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        )
    )]
    async fn ping(&self) -> Result<CallToolResult, ErrorData> {
        let request = ping::ping(&self.config);
        let text = format!(
            "Crustdata dry-run MCP server is running.\n\n{}",
            request.render()
        );
        tracing::debug!(tool = "crustdata_ping", "answered ping");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

fn dry_run_result(tool: &str, request: &DryRunRequest) -> CallToolResult {
    tracing::debug!(
        tool = %tool,
        method = %request.method(),
        url = %request.url(),
        "built dry-run request"
    );
    CallToolResult::success(vec![Content::text(request.render())])
}

#[tool_handler]
impl ServerHandler for ScreenerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "crustdata-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Dry-run tools for the Crustdata screener API: every tool validates its input \
                 and returns a preview of the HTTP request that would be sent. No API call is \
                 ever made and no token is required."
                    .to_string(),
            ),
        }
    }
}

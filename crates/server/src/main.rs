//! Binary entrypoint: CLI parsing, logging, transport serving.

use std::net::SocketAddr;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use crustdata_dryrun::config::ApiConfig;
use crustdata_mcp_server::server::ScreenerServer;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "crustdata-mcp-server",
    version,
    about = "Dry-run MCP server for the Crustdata screener API"
)]
struct Cli {
    /// Transport to serve MCP over.
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Bind address for the streamable HTTP transport.
    #[arg(long, env = "CRUSTDATA_MCP_BIND", default_value = "127.0.0.1:8090")]
    bind: SocketAddr,

    /// Base URL rendered into dry-run previews.
    #[arg(long, env = "CRUSTDATA_API_BASE_URL")]
    base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// Streamable HTTP on the configured bind address.
    Http,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the stdio transport stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.base_url {
        Some(url) => ApiConfig::new(url.clone()).context("invalid base URL")?,
        None => ApiConfig::default(),
    };

    match cli.transport {
        Transport::Stdio => serve_stdio(config).await,
        Transport::Http => serve_http(config, cli.bind).await,
    }
}

async fn serve_stdio(config: ApiConfig) -> anyhow::Result<()> {
    tracing::info!("serving MCP over stdio");
    let service = ScreenerServer::new(config)
        .serve(stdio())
        .await
        .context("start stdio transport")?;
    service.waiting().await.context("stdio transport task")?;
    Ok(())
}

async fn serve_http(config: ApiConfig, bind: SocketAddr) -> anyhow::Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(ScreenerServer::new(config.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    tracing::info!(%bind, "serving MCP over streamable HTTP at /mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("http server")?;
    Ok(())
}

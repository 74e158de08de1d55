mod catalog;
mod config;
mod errors;
mod fairness;
mod jobs;
mod llm_client;
mod routes;
mod seo;
mod state;
mod tools;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::parser::parse_readme;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Collective AI Tools API v{}", env!("CARGO_PKG_VERSION"));

    // Parse the tool catalog once; a readme with no categories is fatal.
    let markdown = std::fs::read_to_string(&config.tools_readme_path)
        .with_context(|| format!("Failed to read tool list at {}", config.tools_readme_path))?;
    let catalog = parse_readme(&markdown)?;
    info!(
        "Tool catalog loaded: {} categories, {} tools",
        catalog.len(),
        catalog.iter().map(|c| c.tools.len()).sum::<usize>()
    );

    // Shared client for feed fetches. Some boards reject requests without
    // a user agent.
    let http = reqwest::Client::builder()
        .user_agent(concat!("collective-api/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        http,
        llm,
        config: config.clone(),
        catalog: Arc::new(catalog),
    };

    // Build router (CORS is applied inside; it is part of the API contract)
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use crate::catalog::parser::Category;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Shared client for feed fetches; carries the only request timeout.
    pub http: reqwest::Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Tool catalog parsed once at startup.
    pub catalog: Arc<Vec<Category>>,
}

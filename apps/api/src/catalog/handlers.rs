use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::catalog::parser::Category;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub categories: Vec<Category>,
    pub total_tools: usize,
    pub last_updated: String,
}

/// GET /api/tools
/// Serves the catalog parsed once at startup.
pub async fn handle_list_tools(State(state): State<AppState>) -> Json<CatalogResponse> {
    let categories: Vec<Category> = state.catalog.as_ref().clone();
    let total_tools = categories.iter().map(|c| c.tools.len()).sum();
    Json(CatalogResponse {
        categories,
        total_tools,
        last_updated: Utc::now().to_rfc3339(),
    })
}

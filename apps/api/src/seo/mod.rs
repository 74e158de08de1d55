//! Crawler metadata generated from the parsed catalog: sitemap, robots,
//! and the machine-readable catalog descriptors.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::state::AppState;

const SITE_URL: &str = "https://collectiveai.tools";

/// GET /sitemap.xml
pub async fn handle_sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    body.push_str(&format!("  <url><loc>{SITE_URL}/</loc></url>\n"));
    for category in state.catalog.iter() {
        body.push_str(&format!(
            "  <url><loc>{SITE_URL}/#{}</loc></url>\n",
            category.id
        ));
    }
    body.push_str("</urlset>\n");

    ([(header::CONTENT_TYPE, "application/xml")], body)
}

/// GET /robots.txt
pub async fn handle_robots() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        format!("User-agent: *\nAllow: /\n\nSitemap: {SITE_URL}/sitemap.xml\n"),
    )
}

/// GET /ai-data.json
/// Machine-readable catalog summary for AI crawlers.
pub async fn handle_ai_data(State(state): State<AppState>) -> Json<serde_json::Value> {
    let categories: Vec<serde_json::Value> = state
        .catalog
        .iter()
        .map(|category| {
            json!({
                "name": category.name,
                "id": category.id,
                "tools": category.tools.iter().map(|t| json!({
                    "name": t.name,
                    "url": t.url,
                    "description": t.description,
                    "tags": t.tags,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    Json(json!({
        "name": "Collective AI Tools",
        "url": SITE_URL,
        "totalCategories": state.catalog.len(),
        "totalTools": state.catalog.iter().map(|c| c.tools.len()).sum::<usize>(),
        "categories": categories,
    }))
}

/// GET /ai-manifest.json
pub async fn handle_ai_manifest() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Collective AI Tools",
        "description": "A curated, community-driven directory of AI tools with a jobs board and AI utilities.",
        "url": SITE_URL,
        "api": {
            "tools": "/api/tools",
            "jobs": "/api/jobs",
            "aiTools": "/api/ai-tools",
            "health": "/api/health",
        },
    }))
}

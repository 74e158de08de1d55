pub mod health;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::handlers as catalog_handlers;
use crate::fairness;
use crate::jobs::handlers as jobs_handlers;
use crate::seo;
use crate::state::AppState;
use crate::tools::handlers as tools_handlers;

pub fn build_router(state: AppState) -> Router {
    // The three fixed CORS headers the browser client relies on:
    // allow-origin, allow-methods, allow-headers.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/tools", get(catalog_handlers::handle_list_tools))
        .route("/api/jobs", get(jobs_handlers::handle_jobs))
        .route("/api/jobs/status", get(jobs_handlers::handle_jobs_status))
        .route("/api/jobs/test", get(jobs_handlers::handle_jobs_test))
        .route("/api/ai-tools", post(tools_handlers::handle_ai_tools))
        .route("/api/fairness/bias-check", post(fairness::handle_bias_check))
        .route("/sitemap.xml", get(seo::handle_sitemap))
        .route("/robots.txt", get(seo::handle_robots))
        .route("/ai-data.json", get(seo::handle_ai_data))
        .route("/ai-manifest.json", get(seo::handle_ai_manifest))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::parser::parse_readme;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    const SAMPLE_README: &str = "## Chatbots\n\
        - [ChatFoo](https://chatfoo.example) - Conversational assistant `#chat`\n\
        - [EchoBot](https://echobot.example) - Minimal chat playground\n";

    fn test_state() -> AppState {
        AppState {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(2))
                .build()
                .unwrap(),
            llm: LlmClient::new("test-key".to_string()),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                tools_readme_path: "README.md".to_string(),
                environment: "development".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
            catalog: Arc::new(parse_readme(SAMPLE_README).unwrap()),
        }
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "collective-api");
    }

    #[tokio::test]
    async fn test_jobs_use_rss_false_serves_mock_data() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/jobs?useRSS=false")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["dataSource"], "Mock Data");
        assert!(!body["jobs"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], body["jobs"].as_array().unwrap().len());
        assert!(!body["activeFeeds"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_jobs_mock_data_respects_filters() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/jobs?useRSS=false&country=DE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response_json(response).await;
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["country"], "DE");
    }

    #[tokio::test]
    async fn test_options_preflight_returns_cors_headers() {
        for path in ["/api/jobs", "/api/ai-tools"] {
            let app = build_router(test_state());
            let response = app
                .oneshot(
                    Request::options(path)
                        .header(header::ORIGIN, "https://collectiveai.tools")
                        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "preflight for {path}");
            let headers = response.headers();
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
        }
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::post("/api/jobs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_ai_tools_missing_tool_is_400() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/ai-tools")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"data": {"description": "x"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("tool"));
    }

    #[tokio::test]
    async fn test_ai_tools_unknown_tool_is_400() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/api/ai-tools")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"tool": "mystery-box"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_jobs_test_requires_feed_param() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/api/jobs/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tools_catalog_route() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["totalTools"], 2);
        assert_eq!(body["categories"][0]["id"], "chatbots");
    }

    #[tokio::test]
    async fn test_fairness_route() {
        let app = build_router(test_state());
        let payload = r#"{
            "yTrue": [0, 1, 1, 0, 1, 0, 1, 0],
            "yPred": [0, 1, 0, 0, 1, 0, 1, 1],
            "sensitive": ["A", "A", "B", "B", "A", "B", "A", "B"]
        }"#;
        let response = app
            .oneshot(
                Request::post("/api/fairness/bias-check")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["metadata"]["nSamples"], 8);
        assert_eq!(body["byGroup"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sitemap_lists_categories() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("<urlset"));
        assert!(body.contains("#chatbots"));
    }
}

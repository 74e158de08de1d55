use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::feeds::{enabled_feeds, find_feed};
use crate::jobs::fetch::{aggregate_jobs, fetch_feed_settled, probe_all_feeds};
use crate::jobs::mock::{mock_jobs, MOCK_SOURCE};
use crate::jobs::models::Job;
use crate::state::AppState;

pub const LIVE_SOURCE: &str = "Live Feeds";

#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub source: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "useRSS")]
    pub use_rss: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
    pub last_updated: String,
    pub sources: Vec<String>,
    pub data_source: String,
    pub active_feeds: Vec<String>,
}

/// GET /api/jobs
/// Aggregates every enabled feed; any upstream failure degrades to mock
/// data rather than an error status.
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Json<JobsResponse> {
    let use_live = query.use_rss.as_deref() != Some("false");

    let (jobs, data_source) = if use_live {
        resolve_dataset(aggregate_jobs(&state.http).await)
    } else {
        (mock_jobs(), MOCK_SOURCE)
    };

    let jobs = apply_filters(jobs, &query);
    let sources = distinct_sources(&jobs);

    Json(JobsResponse {
        total: jobs.len(),
        jobs,
        last_updated: Utc::now().to_rfc3339(),
        sources,
        data_source: data_source.to_string(),
        active_feeds: enabled_feeds().map(|f| f.name.to_string()).collect(),
    })
}

/// Mock fallback when aggregation produced nothing (all feeds down).
pub fn resolve_dataset(aggregated: Vec<Job>) -> (Vec<Job>, &'static str) {
    if aggregated.is_empty() {
        (mock_jobs(), MOCK_SOURCE)
    } else {
        (aggregated, LIVE_SOURCE)
    }
}

/// Query-level filters, applied after aggregation: exact type, substring
/// source, exact country, multi-field substring search.
pub fn apply_filters(jobs: Vec<Job>, query: &JobsQuery) -> Vec<Job> {
    jobs.into_iter()
        .filter(|job| {
            if let Some(job_type) = &query.job_type {
                if job.job_type != *job_type {
                    return false;
                }
            }
            if let Some(source) = &query.source {
                if !job.source.to_lowercase().contains(&source.to_lowercase()) {
                    return false;
                }
            }
            if let Some(country) = &query.country {
                if job.country.as_deref() != Some(country.as_str()) {
                    return false;
                }
            }
            if let Some(search) = &query.search {
                let needle = search.to_lowercase();
                let haystack = format!(
                    "{} {} {} {}",
                    job.title,
                    job.company,
                    job.description,
                    job.tags.join(" ")
                )
                .to_lowercase();
                if !haystack.contains(&needle) {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn distinct_sources(jobs: &[Job]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for job in jobs {
        if !sources.contains(&job.source) {
            sources.push(job.source.clone());
        }
    }
    sources
}

// ── Status route ────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedHealth {
    pub name: String,
    pub status: String,
    pub job_count: usize,
    pub response_time_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub healthy: usize,
    pub failed: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub feeds: Vec<FeedHealth>,
    pub summary: StatusSummary,
    pub last_updated: String,
}

/// GET /api/jobs/status
pub async fn handle_jobs_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let outcomes = probe_all_feeds(&state.http).await;

    let feeds: Vec<FeedHealth> = outcomes
        .into_iter()
        .map(|o| FeedHealth {
            name: o.feed.name.to_string(),
            status: if o.error.is_none() { "healthy" } else { "failed" }.to_string(),
            job_count: o.jobs.len(),
            response_time_ms: o.elapsed_ms,
            error: o.error,
        })
        .collect();

    let healthy = feeds.iter().filter(|f| f.status == "healthy").count();
    let summary = StatusSummary {
        total: feeds.len(),
        healthy,
        failed: feeds.len() - healthy,
    };

    Json(StatusResponse {
        feeds,
        summary,
        last_updated: Utc::now().to_rfc3339(),
    })
}

// ── Single-feed test route ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TestQuery {
    pub feed: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub feed: String,
    pub success: bool,
    pub job_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<Job>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/jobs/test?feed=Name
pub async fn handle_jobs_test(
    State(state): State<AppState>,
    Query(query): Query<TestQuery>,
) -> Result<Json<TestResponse>, AppError> {
    let name = query
        .feed
        .ok_or_else(|| AppError::Validation("Missing required query parameter: feed".to_string()))?;
    let feed = find_feed(&name)
        .ok_or_else(|| AppError::Validation(format!("Unknown feed: {name}")))?;

    let outcome = fetch_feed_settled(&state.http, feed).await;
    Ok(Json(TestResponse {
        feed: feed.name.to_string(),
        success: outcome.error.is_none(),
        job_count: outcome.jobs.len(),
        sample: outcome.jobs.into_iter().next(),
        error: outcome.error,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> JobsQuery {
        JobsQuery::default()
    }

    #[test]
    fn test_resolve_dataset_falls_back_to_mock() {
        let (jobs, source) = resolve_dataset(Vec::new());
        assert_eq!(source, MOCK_SOURCE);
        assert!(!jobs.is_empty());
        assert_eq!(jobs.len(), mock_jobs().len());
    }

    #[test]
    fn test_resolve_dataset_keeps_live_jobs() {
        let (jobs, source) = resolve_dataset(mock_jobs());
        assert_eq!(source, LIVE_SOURCE);
        assert_eq!(jobs.len(), mock_jobs().len());
    }

    #[test]
    fn test_filter_exact_type() {
        let filtered = apply_filters(
            mock_jobs(),
            &JobsQuery {
                job_type: Some("Contract".to_string()),
                ..query()
            },
        );
        assert!(filtered.iter().all(|j| j.job_type == "Contract"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_exact_country() {
        let filtered = apply_filters(
            mock_jobs(),
            &JobsQuery {
                country: Some("DE".to_string()),
                ..query()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].company, "Vector Systems");
    }

    #[test]
    fn test_filter_search_spans_fields() {
        let by_company = apply_filters(
            mock_jobs(),
            &JobsQuery {
                search: Some("signal".to_string()),
                ..query()
            },
        );
        assert_eq!(by_company.len(), 1);

        let by_tag = apply_filters(
            mock_jobs(),
            &JobsQuery {
                search: Some("typescript".to_string()),
                ..query()
            },
        );
        assert_eq!(by_tag.len(), 1);
    }

    #[test]
    fn test_filter_source_substring() {
        let filtered = apply_filters(
            mock_jobs(),
            &JobsQuery {
                source: Some("mock".to_string()),
                ..query()
            },
        );
        assert_eq!(filtered.len(), mock_jobs().len());
    }

    #[test]
    fn test_distinct_sources_preserves_order() {
        let sources = distinct_sources(&mock_jobs());
        assert_eq!(sources, vec![MOCK_SOURCE.to_string()]);
    }
}

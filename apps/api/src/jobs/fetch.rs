//! Feed fan-out and aggregation. Every enabled feed is fetched
//! concurrently; a failing feed degrades to an empty list (no retries,
//! no backoff — the shared client carries the only timeout).

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

use crate::jobs::feeds::enabled_feeds;
use crate::jobs::models::{FeedConfig, FeedKind, Job};
use crate::jobs::normalize::is_ai_job;
use crate::jobs::{adapters, rss};

/// Result of probing a single feed, used by the status and test routes.
pub struct FeedFetchOutcome {
    pub feed: &'static FeedConfig,
    pub jobs: Vec<Job>,
    pub error: Option<String>,
    pub elapsed_ms: u128,
}

/// Fetches and parses one feed, applying its relevance filter.
pub async fn fetch_feed(client: &Client, feed: &FeedConfig) -> anyhow::Result<Vec<Job>> {
    let body = client
        .get(feed.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let jobs = match feed.kind {
        FeedKind::Rss => rss::parse_feed(feed, &body)?,
        FeedKind::RemoteOk => adapters::parse_remoteok(feed, &body)?,
        FeedKind::HackerNews => adapters::parse_hacker_news(feed, &body)?,
        FeedKind::Arbeitnow => adapters::parse_arbeitnow(feed, &body)?,
    };

    let total = jobs.len();
    let relevant: Vec<Job> = jobs
        .into_iter()
        .filter(|job| is_ai_job(job, feed.search_terms))
        .collect();
    debug!(
        feed = feed.name,
        total,
        relevant = relevant.len(),
        "feed fetched"
    );
    Ok(relevant)
}

/// allSettled semantics: never fails, records the error instead.
pub async fn fetch_feed_settled(client: &Client, feed: &'static FeedConfig) -> FeedFetchOutcome {
    let started = std::time::Instant::now();
    match fetch_feed(client, feed).await {
        Ok(jobs) => FeedFetchOutcome {
            feed,
            jobs,
            error: None,
            elapsed_ms: started.elapsed().as_millis(),
        },
        Err(e) => {
            warn!(feed = feed.name, "feed fetch failed: {e:#}");
            FeedFetchOutcome {
                feed,
                jobs: Vec::new(),
                error: Some(e.to_string()),
                elapsed_ms: started.elapsed().as_millis(),
            }
        }
    }
}

/// Fans out over every enabled feed and returns the merged, deduplicated,
/// date-sorted job list.
pub async fn aggregate_jobs(client: &Client) -> Vec<Job> {
    let outcomes = probe_all_feeds(client).await;
    let merged: Vec<Job> = outcomes.into_iter().flat_map(|o| o.jobs).collect();
    let mut jobs = dedupe_jobs(merged);
    sort_by_published_desc(&mut jobs);
    jobs
}

/// One settled fetch per enabled feed, concurrently.
pub async fn probe_all_feeds(client: &Client) -> Vec<FeedFetchOutcome> {
    let futures = enabled_feeds().map(|feed| fetch_feed_settled(client, feed));
    join_all(futures).await
}

/// Collapses jobs sharing an exact `(title, company)` pair, keeping the
/// first occurrence. Known-loose by design.
pub fn dedupe_jobs(jobs: Vec<Job>) -> Vec<Job> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert((job.title.clone(), job.company.clone())))
        .collect()
}

/// Newest first; unparseable dates sort last.
pub fn sort_by_published_desc(jobs: &mut [Job]) {
    jobs.sort_by_key(|job| {
        std::cmp::Reverse(
            parse_published(&job.published_date).unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    });
}

/// Feeds disagree on date formats: RFC 2822 (RSS pubDate), RFC 3339
/// (the JSON APIs), and the occasional bare date.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0)?,
            Utc,
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, published: &str) -> Job {
        Job {
            id: format!("test-{title}"),
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            description: String::new(),
            url: "https://example.com".to_string(),
            published_date: published.to_string(),
            source: "Test".to_string(),
            salary: None,
            experience: None,
            country: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_dedupe_collapses_title_company_pairs() {
        let jobs = vec![
            job("ML Engineer", "DeepCo", "2025-01-01"),
            job("ML Engineer", "DeepCo", "2025-01-02"),
            job("ML Engineer", "OtherCo", "2025-01-03"),
        ];
        let deduped = dedupe_jobs(jobs);
        assert_eq!(deduped.len(), 2);
        // First occurrence wins.
        assert_eq!(deduped[0].published_date, "2025-01-01");
    }

    #[test]
    fn test_sort_newest_first_unparseable_last() {
        let mut jobs = vec![
            job("A", "Co", "garbage"),
            job("B", "Co", "2025-01-06T10:00:00Z"),
            job("C", "Co", "Mon, 06 Jan 2025 12:00:00 +0000"),
        ];
        sort_by_published_desc(&mut jobs);
        assert_eq!(jobs[0].title, "C");
        assert_eq!(jobs[1].title, "B");
        assert_eq!(jobs[2].title, "A");
    }

    #[test]
    fn test_parse_published_formats() {
        assert!(parse_published("Mon, 06 Jan 2025 10:00:00 +0000").is_some());
        assert!(parse_published("2025-01-06T10:00:00+00:00").is_some());
        assert!(parse_published("2025-01-06").is_some());
        assert!(parse_published("next Tuesday").is_none());
        assert!(parse_published("").is_none());
    }
}

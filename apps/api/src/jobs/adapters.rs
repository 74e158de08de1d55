//! JSON shape adapters for the API-backed feeds: RemoteOK, Hacker News
//! (Algolia), Arbeitnow. Each deserializes the upstream payload and
//! normalizes into `Job`.

use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::catalog::parser::slugify;
use crate::jobs::models::{FeedConfig, Job};
use crate::jobs::normalize::{clean_description, extract_country, extract_experience};

// ── RemoteOK ────────────────────────────────────────────────────────────────

/// RemoteOK returns an array whose first element is a legal notice, not a
/// job. Entries without a `position` are skipped.
#[derive(Debug, Deserialize)]
struct RemoteOkEntry {
    position: Option<String>,
    company: Option<String>,
    location: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    description: Option<String>,
    url: Option<String>,
    date: Option<String>,
    salary_min: Option<u64>,
    salary_max: Option<u64>,
}

pub fn parse_remoteok(feed: &FeedConfig, body: &str) -> Result<Vec<Job>> {
    let entries: Vec<RemoteOkEntry> = serde_json::from_str(body)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.position?;
            let location = entry.location.unwrap_or_else(|| "Remote".to_string());
            let description = clean_description(entry.description.as_deref().unwrap_or(""));
            let salary = match (entry.salary_min, entry.salary_max) {
                (Some(min), Some(max)) if max > 0 => Some(format!("${min} - ${max}")),
                _ => None,
            };
            Some(Job {
                id: format!("{}-{}", slugify(feed.name), Uuid::new_v4()),
                experience: extract_experience(&format!("{title} {description}")),
                country: Some(extract_country(&location)),
                job_type: "Full-time".to_string(),
                title,
                company: entry.company.unwrap_or_else(|| "Unknown".to_string()),
                location,
                description,
                url: entry.url.unwrap_or_default(),
                published_date: entry.date.unwrap_or_default(),
                source: feed.name.to_string(),
                salary,
                tags: entry.tags.into_iter().map(|t| t.to_lowercase()).collect(),
            })
        })
        .collect())
}

// ── Hacker News (Algolia) ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AlgoliaResponse {
    #[serde(default)]
    hits: Vec<AlgoliaHit>,
}

#[derive(Debug, Deserialize)]
struct AlgoliaHit {
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
    #[serde(rename = "objectID")]
    object_id: String,
    story_text: Option<String>,
}

pub fn parse_hacker_news(feed: &FeedConfig, body: &str) -> Result<Vec<Job>> {
    let response: AlgoliaResponse = serde_json::from_str(body)?;
    Ok(response
        .hits
        .into_iter()
        .filter_map(|hit| {
            let title = hit.title?;
            // "DeepCo (YC S24) is hiring ML engineers" → company prefix.
            let company = title
                .split(" is hiring")
                .next()
                .filter(|c| c.len() < title.len())
                .map(|c| c.trim().to_string())
                .or(hit.author)
                .unwrap_or_else(|| "Unknown".to_string());
            let description = clean_description(hit.story_text.as_deref().unwrap_or(""));
            let url = hit.url.unwrap_or_else(|| {
                format!("https://news.ycombinator.com/item?id={}", hit.object_id)
            });
            Some(Job {
                id: format!("{}-{}", slugify(feed.name), Uuid::new_v4()),
                experience: extract_experience(&format!("{title} {description}")),
                title,
                company,
                location: "Remote".to_string(),
                job_type: "Full-time".to_string(),
                description,
                url,
                published_date: hit.created_at.unwrap_or_default(),
                source: feed.name.to_string(),
                salary: None,
                country: Some("Remote".to_string()),
                tags: vec!["hacker-news".to_string()],
            })
        })
        .collect())
}

// ── Arbeitnow ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowEntry>,
}

#[derive(Debug, Deserialize)]
struct ArbeitnowEntry {
    title: String,
    company_name: String,
    location: Option<String>,
    #[serde(default)]
    remote: bool,
    url: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    job_types: Vec<String>,
    description: Option<String>,
    /// Unix seconds.
    created_at: Option<i64>,
}

pub fn parse_arbeitnow(feed: &FeedConfig, body: &str) -> Result<Vec<Job>> {
    let response: ArbeitnowResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .into_iter()
        .map(|entry| {
            let location = match (entry.remote, entry.location) {
                (true, _) => "Remote".to_string(),
                (false, Some(loc)) if !loc.is_empty() => loc,
                // Arbeitnow is a German board; unlocated on-site roles default there.
                (false, _) => "Germany".to_string(),
            };
            let description = clean_description(entry.description.as_deref().unwrap_or(""));
            let published_date = entry
                .created_at
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default();
            Job {
                id: format!("{}-{}", slugify(feed.name), Uuid::new_v4()),
                experience: extract_experience(&format!("{} {description}", entry.title)),
                country: Some(extract_country(&location)),
                job_type: entry
                    .job_types
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Full-time".to_string()),
                title: entry.title,
                company: entry.company_name,
                location,
                description,
                url: entry.url,
                published_date,
                source: feed.name.to_string(),
                salary: None,
                tags: entry.tags.into_iter().map(|t| t.to_lowercase()).collect(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::FeedKind;

    const FEED: FeedConfig = FeedConfig {
        name: "Test API",
        url: "https://api.example",
        enabled: true,
        kind: FeedKind::RemoteOk,
        priority: 1,
        search_terms: &[],
    };

    #[test]
    fn test_remoteok_skips_legal_notice() {
        let body = r#"[
            {"legal": "terms apply"},
            {
                "position": "AI Engineer",
                "company": "DeepCo",
                "location": "Berlin, Germany",
                "tags": ["AI", "Python"],
                "description": "<p>Build things</p>",
                "url": "https://remoteok.example/1",
                "date": "2025-01-06T10:00:00+00:00",
                "salary_min": 90000,
                "salary_max": 120000
            }
        ]"#;
        let jobs = parse_remoteok(&FEED, body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "AI Engineer");
        assert_eq!(jobs[0].country.as_deref(), Some("DE"));
        assert_eq!(jobs[0].salary.as_deref(), Some("$90000 - $120000"));
        assert_eq!(jobs[0].tags, vec!["ai", "python"]);
    }

    #[test]
    fn test_hacker_news_company_from_is_hiring() {
        let body = r#"{
            "hits": [
                {
                    "title": "DeepCo (YC S24) is hiring ML engineers",
                    "url": null,
                    "author": "pg",
                    "created_at": "2025-01-06T10:00:00Z",
                    "objectID": "42424242",
                    "story_text": "Join us"
                }
            ]
        }"#;
        let jobs = parse_hacker_news(&FEED, body).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "DeepCo (YC S24)");
        assert_eq!(
            jobs[0].url,
            "https://news.ycombinator.com/item?id=42424242"
        );
    }

    #[test]
    fn test_arbeitnow_remote_and_timestamps() {
        let body = r#"{
            "data": [
                {
                    "title": "Senior Data Scientist",
                    "company_name": "Datenwerk",
                    "location": "Munich",
                    "remote": false,
                    "url": "https://arbeitnow.example/1",
                    "tags": ["Data"],
                    "job_types": ["Full-time"],
                    "description": "Analyse things",
                    "created_at": 1736157600
                },
                {
                    "title": "ML Ops Engineer",
                    "company_name": "Cloudwerk",
                    "location": "",
                    "remote": true,
                    "url": "https://arbeitnow.example/2",
                    "tags": [],
                    "job_types": [],
                    "description": null,
                    "created_at": null
                }
            ]
        }"#;
        let jobs = parse_arbeitnow(&FEED, body).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].location, "Munich");
        assert_eq!(jobs[0].experience.as_deref(), Some("Senior"));
        assert!(jobs[0].published_date.starts_with("2025-01-06"));
        assert_eq!(jobs[1].location, "Remote");
        assert_eq!(jobs[1].job_type, "Full-time");
        assert_eq!(jobs[1].published_date, "");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_remoteok(&FEED, "not json").is_err());
        assert!(parse_hacker_news(&FEED, "[]").is_err());
        assert!(parse_arbeitnow(&FEED, "{").is_err());
    }
}

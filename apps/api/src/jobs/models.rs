use serde::{Deserialize, Serialize};

/// One normalized job listing, regardless of which feed produced it.
/// Field names are camelCase on the wire to match what the job board UI
/// expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub url: String,
    pub published_date: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub tags: Vec<String>,
}

/// Wire format of a configured feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    Rss,
    RemoteOk,
    HackerNews,
    Arbeitnow,
}

/// Static descriptor for one external job source. The feed table is fixed
/// configuration, never mutated at runtime.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub name: &'static str,
    pub url: &'static str,
    pub enabled: bool,
    pub kind: FeedKind,
    /// Lower is fetched/reported first; purely cosmetic ordering.
    pub priority: u8,
    /// Keywords for the AI-relevance filter. Empty keeps everything.
    pub search_terms: &'static [&'static str],
}

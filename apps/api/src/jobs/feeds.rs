//! The fixed feed table. ~8 sources, a mix of RSS boards and JSON APIs.

use crate::jobs::models::{FeedConfig, FeedKind};

/// Keyword list shared by the general-purpose boards. A job survives the
/// relevance filter if any of these appears in its title, description, or
/// tags (case-insensitive substring).
const AI_TERMS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "ml engineer",
    "llm",
    "deep learning",
    "data scien",
    "nlp",
    "computer vision",
    "generative",
    "prompt",
];

pub static FEEDS: &[FeedConfig] = &[
    FeedConfig {
        name: "We Work Remotely",
        url: "https://weworkremotely.com/categories/remote-programming-jobs.rss",
        enabled: true,
        kind: FeedKind::Rss,
        priority: 1,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "Remotive",
        url: "https://remotive.com/remote-jobs/feed/software-dev",
        enabled: true,
        kind: FeedKind::Rss,
        priority: 2,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "Himalayas",
        url: "https://himalayas.app/jobs/rss",
        enabled: true,
        kind: FeedKind::Rss,
        priority: 3,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "Jobicy",
        url: "https://jobicy.com/?feed=job_feed&job_categories=data-science",
        enabled: true,
        kind: FeedKind::Rss,
        priority: 4,
        // Already an AI/data category feed; keep everything it returns.
        search_terms: &[],
    },
    FeedConfig {
        name: "Working Nomads",
        url: "https://www.workingnomads.com/jobs.rss?category=development",
        enabled: true,
        kind: FeedKind::Rss,
        priority: 5,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "RemoteOK",
        url: "https://remoteok.com/api",
        enabled: true,
        kind: FeedKind::RemoteOk,
        priority: 6,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "Hacker News",
        url: "https://hn.algolia.com/api/v1/search_by_date?query=hiring&tags=story&hitsPerPage=50",
        enabled: true,
        kind: FeedKind::HackerNews,
        priority: 7,
        search_terms: AI_TERMS,
    },
    FeedConfig {
        name: "Arbeitnow",
        url: "https://www.arbeitnow.com/api/job-board-api",
        enabled: true,
        kind: FeedKind::Arbeitnow,
        priority: 8,
        search_terms: AI_TERMS,
    },
];

/// Enabled feeds in priority order.
pub fn enabled_feeds() -> impl Iterator<Item = &'static FeedConfig> {
    FEEDS.iter().filter(|f| f.enabled)
}

/// Case-insensitive lookup by feed name (used by /api/jobs/test).
pub fn find_feed(name: &str) -> Option<&'static FeedConfig> {
    FEEDS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_feeds_enabled_by_default() {
        assert_eq!(enabled_feeds().count(), FEEDS.len());
    }

    #[test]
    fn test_find_feed_is_case_insensitive() {
        assert!(find_feed("remoteok").is_some());
        assert!(find_feed("Hacker News").is_some());
        assert!(find_feed("nope").is_none());
    }

    #[test]
    fn test_priorities_are_unique() {
        let mut priorities: Vec<u8> = FEEDS.iter().map(|f| f.priority).collect();
        priorities.sort_unstable();
        priorities.dedup();
        assert_eq!(priorities.len(), FEEDS.len());
    }
}

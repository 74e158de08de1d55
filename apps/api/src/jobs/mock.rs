//! Built-in mock listings, served when the caller opts out of live feeds
//! (`useRSS=false`) or when every feed comes back empty.

use crate::jobs::models::Job;

pub const MOCK_SOURCE: &str = "Mock Data";

pub fn mock_jobs() -> Vec<Job> {
    vec![
        Job {
            id: "mock-1".to_string(),
            title: "Senior Machine Learning Engineer".to_string(),
            company: "Gradient Labs".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            description: "Design and ship production ML systems powering conversational AI products."
                .to_string(),
            url: "https://example.com/jobs/ml-engineer".to_string(),
            published_date: "2025-01-06T10:00:00Z".to_string(),
            source: MOCK_SOURCE.to_string(),
            salary: Some("$160,000 - $220,000".to_string()),
            experience: Some("Senior".to_string()),
            country: Some("Remote".to_string()),
            tags: vec!["machine-learning".to_string(), "python".to_string()],
        },
        Job {
            id: "mock-2".to_string(),
            title: "AI Product Engineer".to_string(),
            company: "Vector Systems".to_string(),
            location: "Berlin, Germany".to_string(),
            job_type: "Full-time".to_string(),
            description: "Build LLM-powered features end to end, from prompt design to rollout."
                .to_string(),
            url: "https://example.com/jobs/ai-product".to_string(),
            published_date: "2025-01-05T09:00:00Z".to_string(),
            source: MOCK_SOURCE.to_string(),
            salary: None,
            experience: Some("Mid".to_string()),
            country: Some("DE".to_string()),
            tags: vec!["llm".to_string(), "typescript".to_string()],
        },
        Job {
            id: "mock-3".to_string(),
            title: "Junior Data Scientist".to_string(),
            company: "Signal Works".to_string(),
            location: "Toronto, Canada".to_string(),
            job_type: "Contract".to_string(),
            description: "Support model evaluation and data pipelines for a growing research team."
                .to_string(),
            url: "https://example.com/jobs/data-scientist".to_string(),
            published_date: "2025-01-04T14:30:00Z".to_string(),
            source: MOCK_SOURCE.to_string(),
            salary: Some("$70,000 - $90,000".to_string()),
            experience: Some("Junior".to_string()),
            country: Some("CA".to_string()),
            tags: vec!["data-science".to_string()],
        },
        Job {
            id: "mock-4".to_string(),
            title: "NLP Research Engineer".to_string(),
            company: "Lexicon AI".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            description: "Prototype and benchmark retrieval and fine-tuning approaches for domain NLP."
                .to_string(),
            url: "https://example.com/jobs/nlp-research".to_string(),
            published_date: "2025-01-03T08:00:00Z".to_string(),
            source: MOCK_SOURCE.to_string(),
            salary: None,
            experience: None,
            country: Some("Remote".to_string()),
            tags: vec!["nlp".to_string(), "research".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_jobs_nonempty_and_sorted() {
        let jobs = mock_jobs();
        assert!(!jobs.is_empty());
        for pair in jobs.windows(2) {
            assert!(pair[0].published_date >= pair[1].published_date);
        }
        assert!(jobs.iter().all(|j| j.source == MOCK_SOURCE));
    }
}

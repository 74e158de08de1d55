//! Normalization heuristics shared by all feed parsers: country and
//! experience extraction, HTML stripping, relevance filtering.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::jobs::models::Job;

/// Description length cap after HTML stripping.
pub const DESCRIPTION_MAX_CHARS: usize = 300;

/// Location substring (lowercase) → ISO 3166-1 alpha-2 code.
/// Matched against the last comma-separated segment of the location.
const COUNTRY_TABLE: &[(&str, &str)] = &[
    ("germany", "DE"),
    ("deutschland", "DE"),
    ("united states", "US"),
    ("usa", "US"),
    ("u.s.", "US"),
    ("united kingdom", "GB"),
    ("uk", "GB"),
    ("england", "GB"),
    ("canada", "CA"),
    ("france", "FR"),
    ("spain", "ES"),
    ("portugal", "PT"),
    ("netherlands", "NL"),
    ("belgium", "BE"),
    ("austria", "AT"),
    ("switzerland", "CH"),
    ("ireland", "IE"),
    ("italy", "IT"),
    ("poland", "PL"),
    ("czech republic", "CZ"),
    ("sweden", "SE"),
    ("norway", "NO"),
    ("denmark", "DK"),
    ("finland", "FI"),
    ("estonia", "EE"),
    ("india", "IN"),
    ("japan", "JP"),
    ("singapore", "SG"),
    ("australia", "AU"),
    ("new zealand", "NZ"),
    ("brazil", "BR"),
    ("mexico", "MX"),
    ("argentina", "AR"),
];

/// Maps a free-text location to a country code.
/// `"Berlin, Germany"` → `"DE"`, `"Remote"` → `"Remote"`, anything
/// unrecognized comes back unchanged.
pub fn extract_country(location: &str) -> String {
    let location = location.trim();
    let last_segment = location
        .rsplit(',')
        .next()
        .unwrap_or(location)
        .trim()
        .to_lowercase();

    for (needle, code) in COUNTRY_TABLE {
        if last_segment == *needle {
            return (*code).to_string();
        }
    }
    if location.to_lowercase().contains("remote") {
        return "Remote".to_string();
    }
    location.to_string()
}

/// Seniority heuristic over title + description text.
pub fn extract_experience(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    const SENIOR: &[&str] = &["senior", "sr.", "staff", "principal", "lead "];
    const JUNIOR: &[&str] = &["junior", "jr.", "entry level", "entry-level", "intern", "graduate"];
    const MID: &[&str] = &["mid-level", "mid level", "intermediate"];

    if SENIOR.iter().any(|m| lower.contains(m)) {
        Some("Senior".to_string())
    } else if JUNIOR.iter().any(|m| lower.contains(m)) {
        Some("Junior".to_string())
    } else if MID.iter().any(|m| lower.contains(m)) {
        Some("Mid".to_string())
    } else {
        None
    }
}

static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?P<code>\d+);").expect("entity pattern is valid"));

/// Removes HTML tags and decodes the common entities feeds actually emit.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");

    let text = NUMERIC_ENTITY.replace_all(&text, |caps: &regex::Captures| {
        caps["code"]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Char-boundary-safe truncation with an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

/// Cleans a raw HTML description down to the capped plain-text form.
pub fn clean_description(html: &str) -> String {
    truncate_chars(&strip_html(html), DESCRIPTION_MAX_CHARS)
}

/// Relevance filter: keep a job if any keyword appears (case-insensitive
/// substring) in its title, description, or tags. An empty keyword list
/// keeps everything.
pub fn is_ai_job(job: &Job, keywords: &[&str]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", job.title, job.description, job.tags.join(" "))
        .to_lowercase();
    keywords.iter().any(|k| haystack.contains(&k.to_lowercase()))
}

/// Splits an RSS item title into (title, company). Handles the two shapes
/// boards actually use: `"Title at Company"` and `"Company: Title"`.
pub fn split_title_company(raw: &str, fallback_company: &str) -> (String, String) {
    if let Some(idx) = raw.rfind(" at ") {
        let title = raw[..idx].trim();
        let company = raw[idx + 4..].trim();
        if !title.is_empty() && !company.is_empty() {
            return (title.to_string(), company.to_string());
        }
    }
    if let Some((company, title)) = raw.split_once(':') {
        let company = company.trim();
        let title = title.trim();
        // Guard against plain titles that merely contain a colon ("Re: ...").
        if !company.is_empty() && !title.is_empty() && company.split_whitespace().count() <= 6 {
            return (title.to_string(), company.to_string());
        }
    }
    (raw.trim().to_string(), fallback_company.to_string())
}

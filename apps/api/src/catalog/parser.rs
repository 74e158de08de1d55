//! Tool catalog parser — turns the curated markdown tool list into categories.
//!
//! Categories come from `##` headings; tools from lines of the shape
//! `- [Name](url) - description`, optionally carrying backticked `#tag`
//! markers. Lines that match neither are skipped without complaint.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One entry in the curated directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// One `##` section of the tool list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub id: String,
    pub tools: Vec<Tool>,
}

static TOOL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- \[(?P<name>[^\]]+)\]\((?P<url>[^)\s]+)\)\s*-\s*(?P<desc>.+)$")
        .expect("tool line pattern is valid")
});

static TAG_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`#(?P<tag>[A-Za-z0-9_-]+)`").expect("tag pattern is valid"));

/// Parses the markdown tool list into categories.
/// A document yielding zero categories is an error (the original site treats
/// that as a fatal load failure).
pub fn parse_readme(markdown: &str) -> Result<Vec<Category>> {
    let mut categories: Vec<Category> = Vec::new();
    let mut current: Option<Category> = None;

    for line in markdown.lines() {
        let line = line.trim();

        if let Some(heading) = line.strip_prefix("## ") {
            if let Some(done) = current.take() {
                categories.push(done);
            }
            let name = heading.trim().to_string();
            current = Some(Category {
                id: slugify(&name),
                name,
                tools: Vec::new(),
            });
            continue;
        }

        let Some(category) = current.as_mut() else {
            continue;
        };
        let Some(caps) = TOOL_LINE.captures(line) else {
            continue;
        };

        let raw_desc = caps["desc"].trim();
        let tags: Vec<String> = TAG_MARKER
            .captures_iter(raw_desc)
            .map(|c| c["tag"].to_string())
            .collect();
        let description = TAG_MARKER.replace_all(raw_desc, "").trim().to_string();

        category.tools.push(Tool {
            name: caps["name"].to_string(),
            url: caps["url"].to_string(),
            description,
            tags,
        });
    }

    if let Some(done) = current.take() {
        categories.push(done);
    }

    if categories.is_empty() {
        bail!("tool list contains no categories");
    }
    Ok(categories)
}

/// Lowercase hyphen slug, used for category ids and feed slugs.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_hyphen = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            slug.push('-');
            last_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

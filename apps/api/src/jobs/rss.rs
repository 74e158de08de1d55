//! RSS feed parsing with a real XML event reader (the job boards all serve
//! RSS 2.0 with `<item>` blocks; descriptions arrive as entity-escaped HTML
//! or CDATA).

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use uuid::Uuid;

use crate::catalog::parser::slugify;
use crate::jobs::models::{FeedConfig, Job};
use crate::jobs::normalize::{
    clean_description, extract_country, extract_experience, split_title_company,
};

/// One raw `<item>` before normalization.
#[derive(Debug, Default, Clone)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
    pub categories: Vec<String>,
}

/// Extracts all `<item>` blocks from an RSS document.
pub fn parse_rss_items(xml: &str) -> Result<Vec<RssItem>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<RssItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => current = Some(RssItem::default()),
                b"title" => field = Some(Field::Title),
                b"link" => field = Some(Field::Link),
                b"description" => field = Some(Field::Description),
                b"pubDate" => field = Some(Field::PubDate),
                b"category" => field = Some(Field::Category),
                _ => field = None,
            },
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                append_field(&mut current, field, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_field(&mut current, field, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
    Category,
}

fn append_field(current: &mut Option<RssItem>, field: Option<Field>, text: &str) {
    let Some(item) = current.as_mut() else {
        return;
    };
    match field {
        Some(Field::Title) => item.title.push_str(text),
        Some(Field::Link) => item.link.push_str(text),
        Some(Field::Description) => item.description.push_str(text),
        Some(Field::PubDate) => item.pub_date.push_str(text),
        Some(Field::Category) => item.categories.push(text.trim().to_lowercase()),
        None => {}
    }
}

/// Parses an RSS document and normalizes every item into a `Job`.
pub fn parse_feed(feed: &FeedConfig, xml: &str) -> Result<Vec<Job>> {
    let items = parse_rss_items(xml)?;
    Ok(items.into_iter().map(|item| item_to_job(feed, item)).collect())
}

fn item_to_job(feed: &FeedConfig, item: RssItem) -> Job {
    let (title, company) = split_title_company(&item.title, feed.name);
    let description = clean_description(&item.description);
    let experience = extract_experience(&format!("{title} {description}"));

    // Remote boards rarely carry a location tag; default to Remote.
    let location = "Remote".to_string();
    let country = Some(extract_country(&location));

    Job {
        id: format!("{}-{}", slugify(feed.name), Uuid::new_v4()),
        job_type: infer_job_type(&title, &description),
        title,
        company,
        location,
        description,
        url: item.link.trim().to_string(),
        published_date: item.pub_date.trim().to_string(),
        source: feed.name.to_string(),
        salary: None,
        experience,
        country,
        tags: item.categories,
    }
}

fn infer_job_type(title: &str, description: &str) -> String {
    let text = format!("{title} {description}").to_lowercase();
    if text.contains("intern") {
        "Internship".to_string()
    } else if text.contains("contract") || text.contains("freelance") {
        "Contract".to_string()
    } else if text.contains("part-time") || text.contains("part time") {
        "Part-time".to_string()
    } else {
        "Full-time".to_string()
    }
}

//! RSS feed monitoring: poll curated news feeds and queue candidate articles.
//!
//! Each cycle fetches every configured feed, parses the RSS/Atom XML, keeps
//! entries whose title or summary mentions a watch keyword, scores the title
//! alone with a cheap heuristic, and persists entries that clear the
//! heuristic threshold as pending articles. Full-text analysis happens later,
//! against the stored queue.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

use crate::fetch::get_text_with_backoff;
use crate::store::ArticleStore;
use crate::utils::today;

/// A named feed to poll.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    pub name: &'static str,
    pub url: &'static str,
}

/// Curated Google News topic feeds, mirroring the sections the report covers.
pub const DEFAULT_FEEDS: &[FeedSpec] = &[
    FeedSpec {
        name: "google_politics",
        url: "https://news.google.com/rss/headlines/section/topic/POLITICS?hl=en-US&gl=US&ceid=US:en",
    },
    FeedSpec {
        name: "google_business",
        url: "https://news.google.com/rss/headlines/section/topic/BUSINESS?hl=en-US&gl=US&ceid=US:en",
    },
    FeedSpec {
        name: "google_nation",
        url: "https://news.google.com/rss/headlines/section/topic/NATION?hl=en-US&gl=US&ceid=US:en",
    },
];

/// Entries must mention one of these to enter the queue at all.
const WATCH_KEYWORDS: &[&str] = &[
    "statistics", "survey", "report", "study", "poll",
    "increase", "decrease", "rise", "fall", "surge", "plunge",
    "tax", "rent", "housing", "emergency room", "deaths",
    "gdp", "debt", "interest rate", "inflation", "growth rate",
];

// Title-only heuristic, refined later by full-text scoring.
const TITLE_DIRECTION_WORDS: &[&str] = &["increase", "decrease", "surge", "spike", "plunge", "soar"];
const TITLE_SURVEY_WORDS: &[&str] = &["statistics", "survey", "report", "study", "poll"];
const HEURISTIC_THRESHOLD: i64 = 30;

/// One parsed feed entry.
#[derive(Debug, Default, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub published: String,
    pub summary: String,
}

/// Poll every feed and persist keyword-matched entries as pending articles.
///
/// Per-feed failures are logged and skipped; the cycle always completes.
#[instrument(level = "info", skip_all)]
pub async fn collect(client: &Client, store: &ArticleStore) -> Result<(), Box<dyn Error>> {
    let mut total = 0usize;
    let mut matched = 0usize;
    let mut queued = 0usize;

    for feed in DEFAULT_FEEDS {
        let xml = match get_text_with_backoff(client, feed.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(feed = feed.name, error = %e, "Feed fetch failed; skipping");
                continue;
            }
        };

        let entries = match parse_feed(&xml) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(feed = feed.name, error = %e, "Feed parse failed; skipping");
                continue;
            }
        };

        info!(feed = feed.name, count = entries.len(), "Parsed feed entries");
        total += entries.len();

        for entry in entries {
            if entry.link.is_empty() {
                continue;
            }
            if !has_watch_keyword(&format!("{} {}", entry.title, entry.summary)) {
                continue;
            }
            matched += 1;

            let score = title_heuristic_score(&entry.title);
            let should_factcheck = score >= HEURISTIC_THRESHOLD;
            let published = if entry.published.is_empty() {
                today()
            } else {
                entry.published.clone()
            };

            match store.save_pending(
                &entry.link,
                &entry.title,
                feed.name,
                &published,
                score,
                should_factcheck,
            ) {
                Ok(true) if should_factcheck => queued += 1,
                Ok(_) => {}
                Err(e) => warn!(url = %entry.link, error = %e, "Failed to save pending article"),
            }
        }
    }

    info!(total, matched, queued, "Feed collection cycle completed");
    Ok(())
}

/// True iff the text mentions any watch keyword (case-insensitive).
pub fn has_watch_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    WATCH_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Cheap title-only priority estimate: +30 for a strong direction word,
/// +20 for a statistics/survey word. Articles at 30+ enter the queue.
pub fn title_heuristic_score(title: &str) -> i64 {
    let lower = title.to_lowercase();
    let mut score = 0;
    if TITLE_DIRECTION_WORDS.iter().any(|k| lower.contains(k)) {
        score += 30;
    }
    if TITLE_SURVEY_WORDS.iter().any(|k| lower.contains(k)) {
        score += 20;
    }
    score
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Link,
    Published,
    Summary,
}

/// Parse RSS 2.0 `<item>` or Atom `<entry>` elements out of a feed document.
///
/// Only the handful of fields the monitor needs are read; everything else is
/// skipped. Handles both text links (RSS) and `href` attribute links (Atom),
/// and CDATA-wrapped titles.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut current = FeedEntry::default();
    let mut in_entry = false;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" | b"entry" => {
                    in_entry = true;
                    current = FeedEntry::default();
                }
                b"title" if in_entry => field = Some(Field::Title),
                b"link" if in_entry => field = Some(Field::Link),
                b"pubDate" | b"published" | b"updated" if in_entry => field = Some(Field::Published),
                b"description" | b"summary" if in_entry => field = Some(Field::Summary),
                _ => field = None,
            },
            Event::Empty(e) => {
                // Atom self-closing <link href="..."/>
                if in_entry && e.name().as_ref() == b"link" {
                    if let Some(attr) = e.try_get_attribute("href")? {
                        current.link = attr.unescape_value()?.into_owned();
                    }
                }
            }
            Event::Text(t) => {
                if in_entry {
                    if let Some(f) = field {
                        append_field(&mut current, f, &t.xml_content()?);
                    }
                }
            }
            Event::GeneralRef(e) => {
                // quick-xml 0.38 reports `&amp;`-style references as their
                // own events; resolve them back into the active field.
                if in_entry {
                    if let Some(f) = field {
                        if let Some(ch) = e.resolve_char_ref()? {
                            append_field(&mut current, f, &ch.to_string());
                        } else if let Some(text) = resolve_predefined_entity(&e.decode()?) {
                            append_field(&mut current, f, text);
                        }
                    }
                }
            }
            Event::CData(t) => {
                if in_entry {
                    if let Some(f) = field {
                        let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                        append_field(&mut current, f, &text);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" | b"entry" => {
                    in_entry = false;
                    let mut entry = std::mem::take(&mut current);
                    entry.title = entry.title.trim().to_string();
                    entry.link = entry.link.trim().to_string();
                    entry.published = entry.published.trim().to_string();
                    entry.summary = entry.summary.trim().to_string();
                    debug!(title = %entry.title, "Parsed feed entry");
                    entries.push(entry);
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

fn append_field(entry: &mut FeedEntry, field: Field, text: &str) {
    let slot = match field {
        Field::Title => &mut entry.title,
        Field::Link => &mut entry.link,
        Field::Published => &mut entry.published,
        Field::Summary => &mut entry.summary,
    };
    slot.push_str(text);
}

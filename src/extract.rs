//! Article page extraction.
//!
//! Downloads an article page and pulls out the fields the analysis core
//! needs: plain-text body (paragraph tags inside `<article>`, falling back
//! to all paragraphs), headline (og:title, then `<title>`), publication date
//! (article:published_time meta, truncated to `YYYY-MM-DD`), source name
//! (og:site_name, then the URL's domain), and the byline journalist.
//!
//! Extraction returning `None` is not an error condition: the orchestrator
//! substitutes a placeholder article and scores it on title signals alone.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};

use crate::fetch::get_text_with_backoff;
use crate::models::Article;
use crate::utils::{domain_of, today, truncate_for_log};

/// First "By Firstname Lastname" byline near the top of the body.
static BYLINE_RE: Lazy<Regex> = Lazy::new(|| {
    // separator is spaces only so a capitalized word on the next line
    // cannot be absorbed into the name
    Regex::new(r"\bBy[ \t]+([A-Z][A-Za-z'.-]+(?:[ \t]+[A-Z][A-Za-z'.-]+){1,3})").unwrap()
});

/// Fetch a URL and extract an [`Article`] from it.
///
/// Returns `Ok(None)` when the page yielded no usable body text.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract(client: &Client, url: &str) -> Result<Option<Article>, Box<dyn Error>> {
    let html = get_text_with_backoff(client, url).await?;
    let article = parse_article(url, &html);
    match &article {
        Some(a) => info!(
            bytes = a.text.len(),
            title = %truncate_for_log(&a.title, 80),
            "Extracted article"
        ),
        None => debug!("Page yielded no article body"),
    }
    Ok(article)
}

/// Parse article fields out of raw HTML. Pure; separated from [`extract`]
/// so tests can run against fixtures without a network.
pub fn parse_article(url: &str, html: &str) -> Option<Article> {
    let document = Html::parse_document(html);

    let text = extract_body(&document);
    if text.trim().is_empty() {
        return None;
    }

    let title = meta_content(&document, r#"meta[property="og:title"]"#)
        .or_else(|| {
            let selector = Selector::parse("title").unwrap();
            document
                .select(&selector)
                .next()
                .map(|e| e.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let date = meta_content(&document, r#"meta[property="article:published_time"]"#)
        .map(|d| d.chars().take(10).collect::<String>())
        .unwrap_or_else(today);

    let source = meta_content(&document, r#"meta[property="og:site_name"]"#)
        .unwrap_or_else(|| domain_of(url));

    let journalist = extract_journalist(&text);

    Some(Article {
        url: url.to_string(),
        title,
        text,
        source,
        date,
        journalist,
    })
}

/// Paragraphs inside `<article>`, falling back to every paragraph on the
/// page, joined with newlines.
fn extract_body(document: &Html) -> String {
    let article_selector = Selector::parse("article p").unwrap();
    let fallback_selector = Selector::parse("p").unwrap();

    let collect = |selector: &Selector| {
        document
            .select(selector)
            .map(|e| e.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = collect(&article_selector);
    if body.is_empty() {
        collect(&fallback_selector)
    } else {
        body
    }
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// First byline name in the body, `"Unknown"` when none is present. Only the
/// opening of the text is searched so quoted "by" phrases deeper in the body
/// cannot masquerade as a byline.
fn extract_journalist(text: &str) -> String {
    let head: String = text.chars().take(600).collect();
    BYLINE_RE
        .captures(&head)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

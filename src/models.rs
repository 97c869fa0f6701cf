//! Data models for analyzed news articles.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`Article`]: Extracted article content and metadata
//! - [`Claim`]: A text span flagged as a checkable assertion
//! - [`ScoreResult`]: The weighted fact-check priority verdict for one article
//! - [`AnalyzedArticle`]: An article bundled with its claims and score
//! - [`ReportGroup`]: A representative article plus its duplicate coverage
//! - [`DailyReport`]: The full batch output written to JSON
//!
//! Serialized field names match the strings the report consumers expect:
//! claim types are lowercase ("statistical"), confidence and priority levels
//! are uppercase ("HIGH").

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An extracted news article, as produced by the article extractor.
///
/// The `text` body may be empty when extraction failed upstream; every
/// consumer in the analysis core must tolerate that. `date` is kept as the
/// raw string the page reported, not parsed into a calendar type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    /// Canonical URL of the article.
    pub url: String,
    /// Headline.
    pub title: String,
    /// Plain-text body. May be empty.
    pub text: String,
    /// Outlet name or domain.
    pub source: String,
    /// Publication date as reported by the page, `YYYY-MM-DD` when available.
    pub date: String,
    /// Byline name, `"Unknown"` when no byline was found.
    pub journalist: String,
}

impl Article {
    /// Build a degraded stand-in for an article whose body could not be
    /// extracted. It still flows through scoring on title signals alone.
    pub fn placeholder(url: &str, title: &str, source: &str, date: &str) -> Self {
        Article {
            url: url.to_string(),
            title: title.to_string(),
            text: String::new(),
            source: source.to_string(),
            date: date.to_string(),
            journalist: "Unknown".to_string(),
        }
    }
}

/// Category of a detected claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Statistical,
    Causal,
    Extreme,
}

/// Fixed confidence level assigned per claim type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A text span flagged as containing a statistical, causal, or rhetorically
/// extreme assertion.
///
/// `matched_text` is the exact substring that triggered the match and serves
/// as the claim's identity for deduplication; `snippet` is surrounding
/// context for display only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claim {
    /// Matched span plus up to 30 characters of context on each side.
    pub snippet: String,
    /// Claim category.
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    /// Confidence fixed per category (statistical HIGH, others MEDIUM).
    pub confidence: Confidence,
    /// The literal substring that triggered the match.
    pub matched_text: String,
}

/// Coarse priority bucket derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

/// Weighted fact-check priority verdict for a single article.
///
/// `breakdown` contains only the categories that actually fired, and its
/// values sum exactly to `total_score`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreResult {
    pub total_score: u32,
    pub breakdown: BTreeMap<String, u32>,
    pub should_factcheck: bool,
    pub priority: PriorityTier,
    pub claims_count: usize,
    pub statistical_claims: usize,
    pub causal_claims: usize,
    pub extreme_claims: usize,
}

/// An article bundled with its detected claims and score. Built once per
/// analysis pass and handed to the deduplicator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzedArticle {
    pub url: String,
    pub article: Article,
    pub claims: Vec<Claim>,
    pub score: ScoreResult,
}

/// The reporting unit: one representative article standing for a group of
/// near-duplicate coverage.
///
/// The representative is the earliest-dated member of its similarity group.
/// `related_info` holds one `"source (journalist)"` string per other member.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportGroup {
    pub article: AnalyzedArticle,
    pub related_count: usize,
    pub related_info: Vec<String>,
}

/// One day's deduplicated report, serialized to the JSON output file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyReport {
    /// Report date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Exact local generation time, `HH:MM:SS`.
    pub generated_at: String,
    /// At most five report groups, in date order.
    pub groups: Vec<ReportGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_article_defaults() {
        let a = Article::placeholder("https://example.com/a", "Title", "example.com", "2024-01-05");
        assert_eq!(a.text, "");
        assert_eq!(a.journalist, "Unknown");
        assert_eq!(a.date, "2024-01-05");
    }

    #[test]
    fn test_claim_type_serializes_lowercase() {
        let claim = Claim {
            snippet: "deaths rose 88 percent".to_string(),
            claim_type: ClaimType::Statistical,
            confidence: Confidence::High,
            matched_text: "rose 88 percent".to_string(),
        };
        let json = serde_json::to_string(&claim).unwrap();
        assert!(json.contains(r#""type":"statistical""#));
        assert!(json.contains(r#""confidence":"HIGH""#));
    }

    #[test]
    fn test_priority_tier_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&PriorityTier::Medium).unwrap(),
            r#""MEDIUM""#
        );
    }

    #[test]
    fn test_daily_report_roundtrip() {
        let report = DailyReport {
            local_date: "2024-01-05".to_string(),
            generated_at: "06:00:00".to_string(),
            groups: vec![],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: DailyReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.local_date, "2024-01-05");
        assert!(back.groups.is_empty());
    }
}

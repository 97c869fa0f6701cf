//! HTML report rendering.
//!
//! Builds the daily fact-check report as a self-contained HTML document:
//! a summary header, the journalist hall-of-fame table, and one card per
//! report group showing the score, tier badge, score breakdown, the top
//! three claims, and a related-coverage note for grouped duplicates. A
//! delivery collaborator picks the file up from disk; this module never
//! talks to a mail server.

use crate::models::{Claim, ClaimType, DailyReport, PriorityTier, ReportGroup};

/// Claims shown per article card.
const MAX_CLAIMS_SHOWN: usize = 3;

fn tier_color(tier: PriorityTier) -> &'static str {
    match tier {
        PriorityTier::High => "#e74c3c",
        PriorityTier::Medium => "#f39c12",
        PriorityTier::Low => "#95a5a6",
    }
}

fn tier_label(tier: PriorityTier) -> &'static str {
    match tier {
        PriorityTier::High => "HIGH",
        PriorityTier::Medium => "MEDIUM",
        PriorityTier::Low => "LOW",
    }
}

fn confidence_label(confidence: crate::models::Confidence) -> &'static str {
    match confidence {
        crate::models::Confidence::High => "HIGH",
        crate::models::Confidence::Medium => "MEDIUM",
        crate::models::Confidence::Low => "LOW",
    }
}

fn claim_type_label(claim_type: ClaimType) -> &'static str {
    match claim_type {
        ClaimType::Statistical => "Statistical",
        ClaimType::Causal => "Causal link",
        ClaimType::Extreme => "Extreme language",
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}…")
    }
}

/// Render the full daily report.
pub fn render_report(report: &DailyReport, top_journalists: &[(String, String, i64)]) -> String {
    let mut html = String::new();
    html.push_str("<html><head><style>\n");
    html.push_str("body { font-family: Arial, sans-serif; line-height: 1.6; }\n");
    html.push_str(".container { max-width: 800px; margin: 0 auto; padding: 20px; }\n");
    html.push_str(".header { background: #24292e; color: white; padding: 30px; border-radius: 10px; text-align: center; }\n");
    html.push_str(".summary { background: #f0f0f0; padding: 20px; border-radius: 10px; margin: 20px 0; }\n");
    html.push_str("</style></head><body><div class=\"container\">\n");

    html.push_str(&format!(
        "<div class=\"header\"><h1>Daily Fact-Check Report</h1><p>{} {}</p></div>\n",
        report.local_date, report.generated_at
    ));

    html.push_str(&format!(
        "<div class=\"summary\"><h2>Summary</h2><p><strong>Articles needing a fact-check:</strong> {}</p></div>\n",
        report.groups.len()
    ));

    html.push_str(&render_hall_of_fame(top_journalists));

    html.push_str("<h2>Articles to check (first report listed first)</h2>\n");
    for (i, group) in report.groups.iter().enumerate() {
        html.push_str(&render_group(i + 1, group));
    }

    html.push_str("</div></body></html>\n");
    html
}

/// Variant written on days when no article clears the fact-check threshold.
pub fn render_empty(local_date: &str) -> String {
    format!(
        "<html><body><div style=\"max-width: 600px; margin: 0 auto; padding: 20px;\">\
         <h1>Daily Fact-Check Report</h1><p>{local_date}</p>\
         <p><strong>No articles required fact-checking today.</strong></p>\
         <p>Monitoring ran normally; nothing cleared the priority threshold.</p>\
         </div></body></html>\n"
    )
}

fn render_hall_of_fame(top: &[(String, String, i64)]) -> String {
    let mut out = String::new();
    out.push_str("<div style=\"margin: 20px 0; padding: 15px; border: 1px solid #e1e4e8; border-radius: 8px;\">\n");
    out.push_str("<h3 style=\"margin-top: 0;\">Most fact-checked journalists</h3>\n<table style=\"width: 100%; border-collapse: collapse;\">\n");
    if top.is_empty() {
        out.push_str(
            "<tr><td style=\"padding: 15px; text-align: center; color: #666;\">\
             Not enough data yet; statistics accumulate from today.</td></tr>\n",
        );
    } else {
        for (name, source, count) in top {
            out.push_str(&format!(
                "<tr><td style=\"padding: 8px; border-bottom: 1px solid #eee;\"><strong>{}</strong> ({})</td>\
                 <td style=\"padding: 8px; border-bottom: 1px solid #eee; text-align: right;\">{}</td></tr>\n",
                escape(name),
                escape(source),
                count
            ));
        }
    }
    out.push_str("</table></div>\n");
    out
}

fn render_group(index: usize, group: &ReportGroup) -> String {
    let analyzed = &group.article;
    let article = &analyzed.article;
    let score = &analyzed.score;
    let color = tier_color(score.priority);

    let mut out = String::new();
    out.push_str("<div style=\"border: 1px solid #ddd; border-radius: 10px; padding: 20px; margin-bottom: 20px; background: #f9f9f9;\">\n");
    out.push_str(&format!(
        "<h3 style=\"margin-top: 0;\">[{}] {}</h3>\n",
        index,
        escape(&article.title)
    ));
    out.push_str(&format!(
        "<p style=\"color: #666;\"><strong>Outlet:</strong> {} | <strong>Journalist:</strong> {} | <strong>Published:</strong> {}</p>\n",
        escape(&article.source),
        escape(&article.journalist),
        escape(&article.date)
    ));

    if group.related_count > 0 {
        out.push_str(&format!(
            "<div style=\"margin-top: 10px; padding: 10px; background: #f1f8ff; border-radius: 5px; font-size: 13px; color: #0366d6;\">\
             <strong>Related coverage ({}):</strong> {}</div>\n",
            group.related_count,
            escape(&group.related_info.join(", "))
        ));
    }

    out.push_str(&format!(
        "<div style=\"background: white; padding: 15px; border-radius: 5px; margin: 10px 0;\">\
         <p style=\"margin: 5px 0;\"><strong>Priority score:</strong> \
         <span style=\"color: {color}; font-size: 20px; font-weight: bold;\">{}</span> \
         <span style=\"background: {color}; color: white; padding: 3px 8px; border-radius: 3px; margin-left: 10px;\">{}</span></p>\
         <p style=\"margin: 5px 0;\"><strong>Claims found:</strong> {}</p>\n",
        score.total_score,
        tier_label(score.priority),
        score.claims_count
    ));
    if !score.breakdown.is_empty() {
        out.push_str("<ul style=\"margin: 5px 0; color: #666; font-size: 13px;\">\n");
        for (category, points) in &score.breakdown {
            out.push_str(&format!("<li>{}: {}</li>\n", escape(category), points));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");

    let shown: Vec<&Claim> = analyzed.claims.iter().take(MAX_CLAIMS_SHOWN).collect();
    if !shown.is_empty() {
        out.push_str("<h4>Key claims</h4>\n<ul>\n");
        for claim in shown {
            out.push_str(&format!(
                "<li><strong>[{}]</strong> {}<br><small>Confidence: {}</small></li>\n",
                claim_type_label(claim.claim_type),
                escape(&clip(&claim.snippet, 100)),
                confidence_label(claim.confidence)
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str(&format!(
        "<p><a href=\"{}\" style=\"background: #3498db; color: white; padding: 10px 15px; text-decoration: none; border-radius: 5px; display: inline-block;\">Read original</a></p>\n",
        escape(&analyzed.url)
    ));
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyzedArticle, Article, Confidence, ScoreResult};
    use std::collections::BTreeMap;

    fn sample_group(related: usize) -> ReportGroup {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("statistical_claim".to_string(), 30);
        breakdown.insert("vague_source".to_string(), 25);
        ReportGroup {
            article: AnalyzedArticle {
                url: "https://example.com/rents".to_string(),
                article: Article {
                    url: "https://example.com/rents".to_string(),
                    title: "Rents <surge> to record high".to_string(),
                    text: String::new(),
                    source: "Morning Wire".to_string(),
                    date: "2024-01-05".to_string(),
                    journalist: "Alex Park".to_string(),
                },
                claims: vec![Claim {
                    snippet: "rents rose 12 percent year on year".to_string(),
                    claim_type: ClaimType::Statistical,
                    confidence: Confidence::High,
                    matched_text: "rose 12 percent".to_string(),
                }],
                score: ScoreResult {
                    total_score: 55,
                    breakdown,
                    should_factcheck: true,
                    priority: PriorityTier::Low,
                    claims_count: 1,
                    statistical_claims: 1,
                    causal_claims: 0,
                    extreme_claims: 0,
                },
            },
            related_count: related,
            related_info: (0..related).map(|i| format!("Outlet {i} (Unknown)")).collect(),
        }
    }

    fn sample_report(related: usize) -> DailyReport {
        DailyReport {
            local_date: "2024-01-05".to_string(),
            generated_at: "06:00:00".to_string(),
            groups: vec![sample_group(related)],
        }
    }

    #[test]
    fn test_report_contains_score_and_breakdown() {
        let html = render_report(&sample_report(0), &[]);
        assert!(html.contains("55"));
        assert!(html.contains("statistical_claim: 30"));
        assert!(html.contains("LOW"));
        assert!(html.contains("rose 12 percent"));
    }

    #[test]
    fn test_related_note_only_when_grouped() {
        let with = render_report(&sample_report(2), &[]);
        assert!(with.contains("Related coverage (2)"));
        let without = render_report(&sample_report(0), &[]);
        assert!(!without.contains("Related coverage"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let html = render_report(&sample_report(0), &[]);
        assert!(html.contains("Rents &lt;surge&gt; to record high"));
    }

    #[test]
    fn test_hall_of_fame_rows() {
        let top = vec![("Alex Park".to_string(), "Morning Wire".to_string(), 3)];
        let html = render_report(&sample_report(0), &top);
        assert!(html.contains("Alex Park"));
        assert!(html.contains("Morning Wire"));
    }

    #[test]
    fn test_empty_report_variant() {
        let html = render_empty("2024-01-05");
        assert!(html.contains("No articles required fact-checking"));
        assert!(html.contains("2024-01-05"));
    }
}

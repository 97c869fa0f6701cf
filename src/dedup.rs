//! Duplicate-coverage grouping: collapse near-identical stories reported by
//! multiple outlets into one representative item per story.
//!
//! The batch is sorted ascending by the raw date string, so the earliest
//! article seeds each group and stands as "first to report". A single
//! left-to-right pass then pulls every later, still-ungrouped article whose
//! title similarity exceeds the threshold into the seed's group. The output
//! keeps discovery order (date order, not score order) and is truncated to
//! the configured cap.
//!
//! Dates sort lexicographically on purpose; mixed formats can misorder, which
//! is accepted rather than corrected (see DESIGN.md).

use tracing::{debug, info};

use crate::models::{AnalyzedArticle, ReportGroup};
use crate::similarity::similarity_ratio;

/// Grouping knobs, taken from [`crate::rules::RuleConfig`].
#[derive(Debug, Clone, Copy)]
pub struct DedupParams {
    /// Titles more similar than this belong to the same story.
    pub similarity_threshold: f64,
    /// Maximum number of groups reported per batch.
    pub max_groups: usize,
}

impl Default for DedupParams {
    fn default() -> Self {
        DedupParams {
            similarity_threshold: 0.6,
            max_groups: 5,
        }
    }
}

/// Group near-duplicate articles and pick one representative per group.
///
/// No re-scoring happens here; the function only arranges already-analyzed
/// articles.
pub fn dedupe(articles: Vec<AnalyzedArticle>, params: DedupParams) -> Vec<ReportGroup> {
    let before = articles.len();

    let mut sorted = articles;
    sorted.sort_by(|x, y| x.article.date.cmp(&y.article.date));

    let mut slots: Vec<Option<AnalyzedArticle>> = sorted.into_iter().map(Some).collect();
    let mut groups = Vec::new();

    for i in 0..slots.len() {
        let Some(seed) = slots[i].take() else { continue };

        let mut related_info = Vec::new();
        for j in (i + 1)..slots.len() {
            let Some(candidate) = slots[j].as_ref() else { continue };
            let ratio = similarity_ratio(&seed.article.title, &candidate.article.title);
            if ratio > params.similarity_threshold {
                debug!(
                    seed = %seed.article.title,
                    candidate = %candidate.article.title,
                    ratio,
                    "Grouped duplicate coverage"
                );
                let member = slots[j].take().unwrap();
                related_info.push(format!(
                    "{} ({})",
                    member.article.source, member.article.journalist
                ));
            }
        }

        groups.push(ReportGroup {
            related_count: related_info.len(),
            related_info,
            article: seed,
        });
    }

    groups.truncate(params.max_groups);
    info!(before, after = groups.len(), "Deduplicated article batch");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, PriorityTier, ScoreResult};
    use std::collections::BTreeMap;

    fn analyzed(title: &str, date: &str, source: &str, journalist: &str) -> AnalyzedArticle {
        let url = format!("https://example.com/{}", title.len());
        AnalyzedArticle {
            url: url.clone(),
            article: Article {
                url,
                title: title.to_string(),
                text: String::new(),
                source: source.to_string(),
                date: date.to_string(),
                journalist: journalist.to_string(),
            },
            claims: vec![],
            score: ScoreResult {
                total_score: 55,
                breakdown: BTreeMap::new(),
                should_factcheck: true,
                priority: PriorityTier::Low,
                claims_count: 0,
                statistical_claims: 0,
                causal_claims: 0,
                extreme_claims: 0,
            },
        }
    }

    #[test]
    fn test_similar_titles_group_with_earliest_representative() {
        let batch = vec![
            analyzed(
                "Tax revenue dropped 20 percent last year",
                "2024-01-07",
                "Daily Ledger",
                "Kim Soyeon",
            ),
            analyzed(
                "Tax revenue fell 20 percent in 2024",
                "2024-01-05",
                "Morning Wire",
                "Alex Park",
            ),
        ];
        let groups = dedupe(batch, DedupParams::default());
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!(group.article.article.date, "2024-01-05");
        assert_eq!(group.related_count, 1);
        assert_eq!(group.related_info, vec!["Daily Ledger (Kim Soyeon)".to_string()]);
    }

    #[test]
    fn test_dissimilar_batch_caps_at_five_groups() {
        let titles = [
            "Zoo welcomes rare snow leopard cubs",
            "Quarterly earnings beat analyst expectations",
            "Marathon route changed after bridge closure",
            "Heatwave strains regional power grid",
            "University opens new robotics laboratory",
            "Ferry service suspended amid dock repairs",
            "Jazz festival lineup announced for spring",
        ];
        let batch: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| analyzed(t, &format!("2024-02-{:02}", i + 1), "Wire", "Unknown"))
            .collect();
        let groups = dedupe(batch, DedupParams::default());
        assert_eq!(groups.len(), 5);
        assert!(groups.iter().all(|g| g.related_count == 0));
    }

    #[test]
    fn test_output_keeps_date_order() {
        let batch = vec![
            analyzed("Ferry service suspended amid dock repairs", "2024-03-09", "A", "Unknown"),
            analyzed("Zoo welcomes rare snow leopard cubs", "2024-03-01", "B", "Unknown"),
            analyzed("Heatwave strains regional power grid", "2024-03-05", "C", "Unknown"),
        ];
        let groups = dedupe(batch, DedupParams::default());
        let dates: Vec<_> = groups.iter().map(|g| g.article.article.date.clone()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-05", "2024-03-09"]);
    }

    #[test]
    fn test_empty_batch() {
        assert!(dedupe(vec![], DedupParams::default()).is_empty());
    }

    #[test]
    fn test_group_member_leaves_pool() {
        // three near-identical titles collapse into one group, not two
        let batch = vec![
            analyzed("Emergency room deaths triple during walkout", "2024-04-01", "A", "Unknown"),
            analyzed("Emergency room deaths tripled amid walkout", "2024-04-02", "B", "Unknown"),
            analyzed("Emergency room deaths triple during walkouts", "2024-04-03", "C", "Unknown"),
        ];
        let groups = dedupe(batch, DedupParams::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].related_count, 2);
    }
}

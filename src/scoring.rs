//! Fact-check priority scoring.
//!
//! Combines an article, its detected claims, and the vague-source flag into
//! a weighted score, a HIGH/MEDIUM/LOW tier, and a fact-check decision.
//!
//! The model is additive over fixed categories and deliberately does not
//! scale with claim count: five statistical claims earn the same 30 points
//! as one. The fact-check threshold (30) sits well below the tier thresholds
//! (70/85), so an article can be flagged for checking while still ranking
//! LOW. That asymmetry is intentional.

use std::collections::BTreeMap;

use crate::models::{Article, Claim, ClaimType, PriorityTier, ScoreResult};
use crate::rules::{RuleConfig, ScoreWeights};

/// Weighted priority scorer. Pure and deterministic: no I/O, no state beyond
/// the rule set it was built with.
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    weights: ScoreWeights,
    political_keywords: Vec<String>,
    economic_keywords: Vec<String>,
    title_keywords: Vec<String>,
    factcheck_threshold: u32,
    high_threshold: u32,
    medium_threshold: u32,
}

impl PriorityScorer {
    pub fn new(config: &RuleConfig) -> Self {
        // Keywords are matched case-insensitively; lowercase them once here.
        let lower = |xs: &[String]| xs.iter().map(|k| k.to_lowercase()).collect();
        PriorityScorer {
            weights: config.weights.clone(),
            political_keywords: lower(&config.political_keywords),
            economic_keywords: lower(&config.economic_keywords),
            title_keywords: lower(&config.title_keywords),
            factcheck_threshold: config.factcheck_threshold,
            high_threshold: config.high_threshold,
            medium_threshold: config.medium_threshold,
        }
    }

    /// Score one article. Each category contributes its full weight at most
    /// once; `breakdown` records only the categories that fired and sums
    /// exactly to `total_score`.
    pub fn calculate_score(
        &self,
        article: &Article,
        claims: &[Claim],
        has_vague_source: bool,
    ) -> ScoreResult {
        let mut total = 0u32;
        let mut breakdown = BTreeMap::new();
        let mut award = |name: &str, points: u32| {
            total += points;
            breakdown.insert(name.to_string(), points);
        };

        let count_of = |t: ClaimType| claims.iter().filter(|c| c.claim_type == t).count();
        let statistical_claims = count_of(ClaimType::Statistical);
        let causal_claims = count_of(ClaimType::Causal);
        let extreme_claims = count_of(ClaimType::Extreme);

        if statistical_claims > 0 {
            award("statistical_claim", self.weights.statistical_claim);
        }
        if causal_claims > 0 {
            award("causal_claim", self.weights.causal_claim);
        }
        if extreme_claims > 0 {
            award("extreme_language", self.weights.extreme_language);
        }
        if has_vague_source {
            award("vague_source", self.weights.vague_source);
        }

        let haystack = format!("{} {}", article.title, article.text).to_lowercase();
        if self.contains_any(&haystack, &self.political_keywords)
            || self.contains_any(&haystack, &self.economic_keywords)
        {
            award("political_economic", self.weights.political_economic);
        }

        let title = article.title.to_lowercase();
        if self.contains_any(&title, &self.title_keywords) {
            award("title_keyword", self.weights.title_keyword);
        }

        let priority = if total >= self.high_threshold {
            PriorityTier::High
        } else if total >= self.medium_threshold {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        };

        ScoreResult {
            total_score: total,
            breakdown,
            should_factcheck: total >= self.factcheck_threshold,
            priority,
            claims_count: claims.len(),
            statistical_claims,
            causal_claims,
            extreme_claims,
        }
    }

    fn contains_any(&self, haystack: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

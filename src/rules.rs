//! Rule configuration for claim detection and priority scoring.
//!
//! Every pattern list, keyword list, weight, and threshold the analysis core
//! uses lives here as data, not code. The built-in default rule set covers
//! English-language news; operators can tune the rules by pointing the CLI at
//! a YAML file that overrides any subset of fields, without touching the
//! detection or scoring control flow.
//!
//! Regexes are compiled once per detector instance via [`RuleConfig::compile`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::info;

/// Additive score weights per category. Each category contributes its full
/// weight at most once per article, regardless of how many claims of that
/// type were found.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub statistical_claim: u32,
    pub causal_claim: u32,
    pub extreme_language: u32,
    pub vague_source: u32,
    pub political_economic: u32,
    pub title_keyword: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            statistical_claim: 30,
            causal_claim: 20,
            extreme_language: 15,
            vague_source: 25,
            political_economic: 10,
            title_keyword: 20,
        }
    }
}

/// The complete tunable rule set: detection patterns, scoring keywords,
/// weights, and thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Statistical claim patterns (numeric value + unit/direction token).
    pub stat_patterns: Vec<String>,
    /// Causal phrase patterns ("A because of B", "A triggers B").
    pub causal_patterns: Vec<String>,
    /// Intensity vocabulary matched as whole words/phrases.
    pub extreme_terms: Vec<String>,
    /// Hedging-phrase patterns that signal unverified sourcing.
    pub vague_patterns: Vec<String>,
    pub political_keywords: Vec<String>,
    pub economic_keywords: Vec<String>,
    /// Strong-tone words that earn the title bonus.
    pub title_keywords: Vec<String>,
    pub weights: ScoreWeights,
    /// An article at or above this score is flagged for fact-checking.
    /// Deliberately lower than the tier thresholds: a flagged article can
    /// still land in the LOW tier.
    pub factcheck_threshold: u32,
    pub high_threshold: u32,
    pub medium_threshold: u32,
    /// Title similarity above this ratio groups two articles as duplicate
    /// coverage of the same story.
    pub similarity_threshold: f64,
    /// Hard cap on report groups per day.
    pub max_report_groups: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        RuleConfig {
            stat_patterns: vec![
                // multiplier + direction: "3-fold increase", "4 times jump"
                r"(?i)\b\d+(?:\.\d+)?(?:\s*|-)(?:times|x|fold)\s+(?:increase|decrease|rise|jump|drop|growth)".to_string(),
                // directional verb + percentage: "rose 88 percent"
                r"(?i)\b(?:rose|fell|jumped|dropped|climbed|surged|plunged|grew|shrank|declined|increased|decreased)\s+(?:by\s+)?\d+(?:\.\d+)?\s*(?:%|percent)".to_string(),
                // percentage + direction noun: "20% increase"
                r"(?i)\b\d+(?:\.\d+)?\s*(?:%|percent)\s+(?:increase|decrease|rise|fall|drop|jump|surge|growth|decline)".to_string(),
                // year-over-year percentages
                r"(?i)\b(?:up|down)\s+\d+(?:\.\d+)?\s*(?:%|percent)\s+(?:from|on|versus)\s+(?:a\s+year\s+(?:ago|earlier)|last\s+year)".to_string(),
                // currency-scale amounts
                r"(?i)[$€£]\s*\d+(?:[.,]\d+)?\s*(?:million|billion|trillion)\b".to_string(),
                r"(?i)\b\d+(?:[.,]\d+)?\s*(?:million|billion|trillion)\s+(?:dollars|euros|pounds|won)\b".to_string(),
                // raw casualty/case counts
                r"(?i)\b\d[\d,]*\s+(?:deaths|fatalities|casualties|cases)\b".to_string(),
                // superlative phrases
                r"(?i)\b(?:record|all-time|historic)\s+(?:high|low)s?\b".to_string(),
            ],
            causal_patterns: vec![
                r"(?i)[^.!?\n]{3,80}?\s(?:because\s+of|due\s+to|owing\s+to|as\s+a\s+result\s+of|in\s+the\s+wake\s+of)\s[^.!?\n]{3,80}".to_string(),
                r"(?i)[^.!?\n]{3,80}?\s(?:causes|caused|triggers|triggered|leads\s+to|led\s+to|results\s+in|resulted\s+in|fuels|fueled)\s[^.!?\n]{3,80}".to_string(),
            ],
            extreme_terms: vec![
                "surge", "spike", "soar", "skyrocket",
                "plunge", "plummet", "collapse", "crash",
                "record high", "record low", "all-time high", "all-time low",
                "record-breaking", "unprecedented", "unparalleled", "catastrophic",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            vague_patterns: vec![
                r"(?i)\b(?:is|are|was|were)\s+said\s+to\b".to_string(),
                r"(?i)\bappears?\s+to\s+(?:be|have)\b".to_string(),
                r"(?i)\b(?:is|are|was|were)\s+presumed\s+to\b".to_string(),
                r"(?i)\b(?:has|have|had)\s+been\s+reported\s+to\b".to_string(),
                r"(?i)\breportedly\b".to_string(),
            ],
            political_keywords: vec![
                "government", "parliament", "congress", "president", "minister",
                "senate", "election", "lawmakers", "legislation", "ruling party",
                "opposition",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            economic_keywords: vec![
                "economy", "gdp", "growth rate", "inflation", "interest rate",
                "debt", "tax", "rent", "housing", "unemployment", "employment",
                "wages", "income",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            title_keywords: vec![
                "increase", "decrease", "surge", "plunge", "record", "lowest",
                "all-time",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            weights: ScoreWeights::default(),
            factcheck_threshold: 30,
            high_threshold: 85,
            medium_threshold: 70,
            similarity_threshold: 0.6,
            max_report_groups: 5,
        }
    }
}

impl RuleConfig {
    /// Load a rule file from YAML. Missing fields fall back to the defaults,
    /// so a rule file only needs to name what it overrides.
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: RuleConfig = serde_yaml::from_str(&raw)?;
        info!(path, "Loaded rule configuration");
        Ok(config)
    }

    /// Compile the pattern lists into reusable regexes. Called once per
    /// detector instance.
    pub fn compile(&self) -> Result<CompiledRules, regex::Error> {
        let stat = self
            .stat_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        let causal = self
            .causal_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        // Whole-word matching keeps "surge" from firing inside "resurgence".
        let extreme = self
            .extreme_terms
            .iter()
            .map(|t| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(t))))
            .collect::<Result<Vec<_>, _>>()?;
        let vague = self
            .vague_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledRules {
            stat,
            causal,
            extreme,
            vague,
        })
    }
}

/// Compiled regex sets, built once and reused across every `detect` call.
#[derive(Debug)]
pub struct CompiledRules {
    pub stat: Vec<Regex>,
    pub causal: Vec<Regex>,
    pub extreme: Vec<Regex>,
    pub vague: Vec<Regex>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_compile() {
        let rules = RuleConfig::default();
        let compiled = rules.compile().unwrap();
        assert_eq!(compiled.stat.len(), rules.stat_patterns.len());
        assert_eq!(compiled.extreme.len(), rules.extreme_terms.len());
    }

    #[test]
    fn test_default_thresholds() {
        let rules = RuleConfig::default();
        assert_eq!(rules.factcheck_threshold, 30);
        assert_eq!(rules.medium_threshold, 70);
        assert_eq!(rules.high_threshold, 85);
        assert_eq!(rules.max_report_groups, 5);
    }

    #[test]
    fn test_yaml_partial_override_keeps_defaults() {
        let yaml = "weights:\n  statistical_claim: 40\nfactcheck_threshold: 50\n";
        let config: RuleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.weights.statistical_claim, 40);
        assert_eq!(config.weights.vague_source, 25);
        assert_eq!(config.factcheck_threshold, 50);
        assert!(!config.stat_patterns.is_empty());
    }

    #[test]
    fn test_extreme_terms_word_bounded() {
        let compiled = RuleConfig::default().compile().unwrap();
        let surge = compiled
            .extreme
            .iter()
            .find(|re| re.is_match("a surge in cases"))
            .unwrap();
        assert!(!surge.is_match("the resurgence of jazz"));
    }
}

//! Claim detection: scans article text for checkable assertions.
//!
//! Three independent pattern families run left-to-right over the full text:
//!
//! 1. **Statistical**: numeric value plus a unit/direction token
//!    ("rose 88 percent", "$3 billion", "record high"). Confidence HIGH.
//! 2. **Causal**: "A because of B" / "A triggers B" phrases. Confidence
//!    MEDIUM; the matched phrase doubles as the snippet.
//! 3. **Extreme vocabulary**: fixed intensity terms ("surge", "plunge",
//!    "unprecedented"); one claim per term present, at its first occurrence.
//!    Confidence MEDIUM.
//!
//! Candidates are deduplicated by exact `matched_text`: the trigger span is
//! a claim's identity, never the surrounding snippet. The detector also
//! answers [`ClaimDetector::has_vague_source`], a pure boolean probe for
//! hedging phrases with no attributed source.

use itertools::Itertools;
use once_cell::sync::Lazy;

use crate::models::{Claim, ClaimType, Confidence};
use crate::rules::{CompiledRules, RuleConfig};

/// Characters of context captured on each side of a matched span.
const CONTEXT_CHARS: usize = 30;

static DEFAULT_DETECTOR: Lazy<ClaimDetector> = Lazy::new(|| {
    ClaimDetector::new(&RuleConfig::default()).expect("default rule set compiles")
});

/// Pattern-based claim detector. Compiles its rule set once at construction;
/// every call after that operates solely on its input text.
#[derive(Debug)]
pub struct ClaimDetector {
    rules: CompiledRules,
}

impl ClaimDetector {
    pub fn new(config: &RuleConfig) -> Result<Self, regex::Error> {
        Ok(ClaimDetector {
            rules: config.compile()?,
        })
    }

    /// Shared detector built from the default rule set.
    pub fn default_rules() -> &'static ClaimDetector {
        &DEFAULT_DETECTOR
    }

    /// Extract checkable claims from article text.
    ///
    /// Empty input is the normal degraded case and yields an empty list.
    /// Returned claims have pairwise-distinct `matched_text` values, in
    /// discovery order.
    pub fn detect(&self, text: &str) -> Vec<Claim> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut claims = Vec::new();

        for pattern in &self.rules.stat {
            for m in pattern.find_iter(text) {
                claims.push(Claim {
                    snippet: context_snippet(text, m.start(), m.end()),
                    claim_type: ClaimType::Statistical,
                    confidence: Confidence::High,
                    matched_text: m.as_str().to_string(),
                });
            }
        }

        for pattern in &self.rules.causal {
            for m in pattern.find_iter(text) {
                let phrase = m.as_str().trim().to_string();
                claims.push(Claim {
                    snippet: phrase.clone(),
                    claim_type: ClaimType::Causal,
                    confidence: Confidence::Medium,
                    matched_text: phrase,
                });
            }
        }

        // One claim per vocabulary term present, anchored at its first hit.
        for pattern in &self.rules.extreme {
            if let Some(m) = pattern.find(text) {
                claims.push(Claim {
                    snippet: context_snippet(text, m.start(), m.end()),
                    claim_type: ClaimType::Extreme,
                    confidence: Confidence::Medium,
                    matched_text: m.as_str().to_string(),
                });
            }
        }

        claims
            .into_iter()
            .unique_by(|c| c.matched_text.clone())
            .collect()
    }

    /// True iff the text contains a hedging phrase that signals unverified
    /// sourcing ("is said to", "reportedly", ...). Independent of [`detect`];
    /// callable before or after it.
    ///
    /// [`detect`]: ClaimDetector::detect
    pub fn has_vague_source(&self, text: &str) -> bool {
        self.rules.vague.iter().any(|p| p.is_match(text))
    }
}

/// Matched span plus up to [`CONTEXT_CHARS`] characters of surrounding
/// context, clamped to the text bounds and trimmed. Operates on character
/// boundaries so multi-byte input cannot split a code point.
fn context_snippet(text: &str, start: usize, end: usize) -> String {
    let prefix: String = text[..start]
        .chars()
        .rev()
        .take(CONTEXT_CHARS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let suffix: String = text[end..].chars().take(CONTEXT_CHARS).collect();
    format!("{}{}{}", prefix, &text[start..end], suffix)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn detector() -> &'static ClaimDetector {
        ClaimDetector::default_rules()
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(detector().detect("").is_empty());
        assert!(!detector().has_vague_source(""));
    }

    #[test]
    fn test_statistical_percentage_claim() {
        let text = "Transfer refusals rose 88 percent compared with the prior year.";
        let claims = detector().detect(text);
        let stat: Vec<_> = claims
            .iter()
            .filter(|c| c.claim_type == ClaimType::Statistical)
            .collect();
        assert_eq!(stat.len(), 1);
        assert_eq!(stat[0].matched_text, "rose 88 percent");
        assert_eq!(stat[0].confidence, Confidence::High);
        assert!(stat[0].snippet.contains("rose 88 percent"));
    }

    #[test]
    fn test_statistical_superlative_claim() {
        let claims = detector().detect("The refusal count marks a record high for the program.");
        assert!(claims.iter().any(|c| {
            c.claim_type == ClaimType::Statistical && c.matched_text.eq_ignore_ascii_case("record high")
        }));
    }

    #[test]
    fn test_causal_claim_uses_phrase_as_snippet() {
        let text = "Emergency admissions climbed sharply because of the walkout at three hospitals.";
        let claims = detector().detect(text);
        let causal: Vec<_> = claims
            .iter()
            .filter(|c| c.claim_type == ClaimType::Causal)
            .collect();
        assert_eq!(causal.len(), 1);
        assert_eq!(causal[0].snippet, causal[0].matched_text);
        assert!(causal[0].matched_text.contains("because of"));
        assert_eq!(causal[0].confidence, Confidence::Medium);
    }

    #[test]
    fn test_extreme_term_first_occurrence_with_context() {
        let text = "Officials described an unprecedented wave of filings. \
                    Another unprecedented backlog followed in March.";
        let claims = detector().detect(text);
        let extreme: Vec<_> = claims
            .iter()
            .filter(|c| c.claim_type == ClaimType::Extreme)
            .collect();
        assert_eq!(extreme.len(), 1);
        assert!(extreme[0].snippet.contains("wave of filings"));
        assert!(!extreme[0].snippet.contains("backlog"));
    }

    #[test]
    fn test_matched_text_pairwise_distinct() {
        let text = "Cases jumped 40 percent in May. Later figures confirmed cases \
                    jumped 40 percent, an unprecedented surge driven by an unprecedented heat.";
        let claims = detector().detect(text);
        let mut seen = HashSet::new();
        for claim in &claims {
            assert!(seen.insert(claim.matched_text.clone()), "duplicate matched_text");
        }
    }

    #[test]
    fn test_snippet_clamped_at_text_bounds() {
        let text = "Deaths rose 12 percent.";
        let claims = detector().detect(text);
        assert!(!claims.is_empty());
        assert!(claims[0].snippet.len() <= text.len());
    }

    #[test]
    fn test_vague_source_phrases() {
        let d = detector();
        assert!(d.has_vague_source("The ministry is said to have shelved the plan."));
        assert!(d.has_vague_source("The program appears to be behind schedule."));
        assert!(d.has_vague_source("Losses have been reported to exceed forecasts."));
        assert!(d.has_vague_source("The deal reportedly collapsed overnight."));
        assert!(!d.has_vague_source("The ministry published the audited figures."));
    }

    #[test]
    fn test_vague_probe_independent_of_detect() {
        let d = detector();
        let text = "The deficit reportedly widened.";
        let before = d.has_vague_source(text);
        let _ = d.detect(text);
        let after = d.has_vague_source(text);
        assert_eq!(before, after);
        assert!(before);
    }

    #[test]
    fn test_alternate_rule_set_injectable() {
        let mut config = RuleConfig::default();
        config.extreme_terms = vec!["meltdown".to_string()];
        config.stat_patterns.clear();
        config.causal_patterns.clear();
        let d = ClaimDetector::new(&config).unwrap();
        let claims = d.detect("Analysts called it a meltdown in slow motion.");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim_type, ClaimType::Extreme);
    }
}

//! # Search Module
//!
//! Scoring of web search hits against a fixed domain trust table.
//!
//! The network client lives in the app crate; it hands the hits in and
//! gets a [`SearchAssessment`] back. Only hits from trusted domains count.
//! Each trusted hit votes for "true" or "false" by counting indicator
//! keywords in its title and description, weighted by the domain's trust.
//!
//! Integer arithmetic only: "more than 1.5 times" is `a * 2 > b * 3`.

use crate::{ClaimStatus, ClaimVerification};
use serde::{Deserialize, Serialize};

/// Trusted domains and their trust weight, checked in order.
pub const TRUSTED_DOMAINS: &[(&str, u32)] = &[
    ("snopes.com", 95),
    ("factcheck.org", 95),
    ("politifact.com", 90),
    ("fullfact.org", 90),
    ("reuters.com", 85),
    ("apnews.com", 85),
    ("bbc.com", 80),
    ("nytimes.com", 75),
    ("wikipedia.org", 70),
    ("nasa.gov", 95),
    ("noaa.gov", 90),
    ("cdc.gov", 90),
    ("nih.gov", 90),
];

const TRUE_SUBSTRINGS: &[&str] = &["true", "correct", "accurate", "verified", "confirmed"];
const TRUE_WORDS: &[&str] = &["yes"];
const FALSE_SUBSTRINGS: &[&str] = &["false", "incorrect", "wrong", "fake", "debunked", "myth"];
const FALSE_WORDS: &[&str] = &["no"];

/// Most trusted sources attached to an assessment.
pub const MAX_SOURCES: usize = 3;

/// Longest snippet kept per source, before the ellipsis.
pub const SNIPPET_CHARS: usize = 150;

/// Source label used on claims produced from web search.
pub const WEB_SEARCH_SOURCE: &str = "Web Search Analysis";

/// One web search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub age: String,
}

/// A hit from a trusted domain, kept as evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSource {
    pub title: String,
    pub url: String,
    pub trust_level: u32,
    pub snippet: String,
}

/// Result of checking one claim against the web.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAssessment {
    pub claim: String,
    pub status: ClaimStatus,
    pub confidence: u8,
    pub explanation: String,
    pub sources: Vec<TrustedSource>,
}

impl SearchAssessment {
    /// An UNVERIFIABLE assessment with confidence 0.
    #[must_use]
    pub fn unverifiable(claim: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            status: ClaimStatus::Unverifiable,
            confidence: 0,
            explanation: explanation.into(),
            sources: Vec::new(),
        }
    }

    /// The claim record this assessment contributes, or `None` when it is
    /// UNVERIFIABLE and should be left out of the analysis.
    #[must_use]
    pub fn into_claim(self) -> Option<ClaimVerification> {
        if self.status == ClaimStatus::Unverifiable {
            return None;
        }
        Some(
            ClaimVerification::new(
                self.claim,
                self.status,
                self.confidence,
                WEB_SEARCH_SOURCE,
                self.explanation,
            )
            .with_sources(self.sources),
        )
    }
}

/// Trust weight for a URL, or `None` when its domain is not trusted.
#[must_use]
pub fn domain_trust(url: &str) -> Option<u32> {
    let url = url.to_lowercase();
    TRUSTED_DOMAINS
        .iter()
        .find(|(domain, _)| url.contains(domain))
        .map(|(_, trust)| *trust)
}

/// Cut `text` to at most `max_chars` characters, appending "..." if cut.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

fn keyword_hits(content: &str, words: &[&str], substrings: &[&str], lexicon: &[&str]) -> usize {
    substrings.iter().filter(|k| content.contains(*k)).count()
        + lexicon.iter().filter(|k| words.contains(*k)).count()
}

/// Assess search hits for `claim`.
#[must_use]
pub fn assess_results(claim: &str, hits: &[SearchHit]) -> SearchAssessment {
    if hits.is_empty() {
        return SearchAssessment::unverifiable(claim, "No relevant sources found");
    }

    let mut trusted = Vec::new();
    let mut total_trust: u32 = 0;
    let mut true_signals: u32 = 0;
    let mut false_signals: u32 = 0;

    for hit in hits {
        let Some(trust) = domain_trust(&hit.url) else {
            continue;
        };
        trusted.push(TrustedSource {
            title: hit.title.clone(),
            url: hit.url.clone(),
            trust_level: trust,
            snippet: truncate_chars(&hit.description, SNIPPET_CHARS),
        });

        let content = format!("{} {}", hit.title, hit.description).to_lowercase();
        let words: Vec<&str> = content
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let true_count = keyword_hits(&content, &words, TRUE_SUBSTRINGS, TRUE_WORDS);
        let false_count = keyword_hits(&content, &words, FALSE_SUBSTRINGS, FALSE_WORDS);

        if true_count > false_count {
            true_signals = true_signals.saturating_add(trust);
        } else if false_count > true_count {
            false_signals = false_signals.saturating_add(trust);
        }
        total_trust = total_trust.saturating_add(trust);
    }

    if total_trust == 0 {
        return SearchAssessment {
            claim: claim.to_string(),
            status: ClaimStatus::Unverifiable,
            confidence: 30,
            explanation: String::from("No trusted sources found. Results from general web only."),
            sources: Vec::new(),
        };
    }

    let found = trusted.len();
    let share = |signals: u32| -> u8 {
        let percent = u64::from(signals) * 100 / u64::from(total_trust);
        percent.min(95) as u8
    };

    let (status, confidence, explanation) =
        if u64::from(true_signals) * 2 > u64::from(false_signals) * 3 {
            (
                ClaimStatus::Verified,
                share(true_signals),
                format!(
                    "Multiple trusted sources confirm this claim. Found {} reliable source(s).",
                    found
                ),
            )
        } else if u64::from(false_signals) * 2 > u64::from(true_signals) * 3 {
            (
                ClaimStatus::False,
                share(false_signals),
                format!(
                    "Trusted sources indicate this is false. Found {} reliable source(s) debunking this.",
                    found
                ),
            )
        } else {
            (
                ClaimStatus::Uncertain,
                50,
                format!(
                    "Mixed signals from {} trusted source(s). Requires further verification.",
                    found
                ),
            )
        };

    trusted.truncate(MAX_SOURCES);
    SearchAssessment {
        claim: claim.to_string(),
        status,
        confidence,
        explanation,
        sources: trusted,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(url: &str, title: &str, description: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            age: String::new(),
        }
    }

    #[test]
    fn trust_uses_first_matching_domain() {
        assert_eq!(domain_trust("https://www.Snopes.com/fact-check/x"), Some(95));
        assert_eq!(domain_trust("https://en.wikipedia.org/wiki/Sun"), Some(70));
        assert_eq!(domain_trust("https://example.com"), None);
    }

    #[test]
    fn no_hits_is_unverifiable() {
        let a = assess_results("claim", &[]);
        assert_eq!(a.status, ClaimStatus::Unverifiable);
        assert_eq!(a.confidence, 0);
        assert!(a.into_claim().is_none());
    }

    #[test]
    fn untrusted_hits_only() {
        let a = assess_results("claim", &[hit("https://blog.example", "True!", "yes")]);
        assert_eq!(a.status, ClaimStatus::Unverifiable);
        assert_eq!(a.confidence, 30);
        assert!(a.sources.is_empty());
    }

    #[test]
    fn debunking_sources_mark_false() {
        let hits = [
            hit(
                "https://www.snopes.com/flat-earth",
                "Flat Earth claim debunked",
                "This myth is false.",
            ),
            hit(
                "https://www.nasa.gov/earth",
                "Earth is round",
                "Satellite imagery shows the claim is wrong.",
            ),
            hit("https://random.example", "Flat earth true", "yes it is"),
        ];
        let a = assess_results("The Earth is flat", &hits);
        assert_eq!(a.status, ClaimStatus::False);
        assert_eq!(a.confidence, 95);
        assert_eq!(a.sources.len(), 2);

        let claim = a.into_claim();
        assert!(matches!(claim, Some(ref c) if c.source == WEB_SEARCH_SOURCE && c.sources.len() == 2));
    }

    #[test]
    fn confirming_sources_mark_verified() {
        let hits = [
            hit("https://apnews.com/a", "Confirmed: water boils at 100C", "Accurate."),
            hit("https://bbc.com/b", "Boiling point", "Nothing conclusive here"),
        ];
        let a = assess_results("Water boils at 100 degrees", &hits);
        assert_eq!(a.status, ClaimStatus::Verified);
        // 85 of 165 trust points voted true.
        assert_eq!(a.confidence, 51);
    }

    #[test]
    fn balanced_votes_are_uncertain() {
        let hits = [
            hit("https://reuters.com/a", "Claim is true", ""),
            hit("https://apnews.com/b", "Claim is false", ""),
        ];
        let a = assess_results("claim", &hits);
        assert_eq!(a.status, ClaimStatus::Uncertain);
        assert_eq!(a.confidence, 50);
    }

    #[test]
    fn short_indicators_match_whole_words_only() {
        // "know" and "nothing" must not count as "no".
        let hits = [hit("https://cdc.gov/x", "We know it is correct", "nothing else")];
        let a = assess_results("claim", &hits);
        assert_eq!(a.status, ClaimStatus::Verified);
    }

    #[test]
    fn sources_are_capped_and_snippets_truncated() {
        let long = "x".repeat(200);
        let hits: Vec<SearchHit> = (0..5)
            .map(|i| hit(&format!("https://factcheck.org/{}", i), "false", &long))
            .collect();
        let a = assess_results("claim", &hits);
        assert_eq!(a.sources.len(), MAX_SOURCES);
        assert_eq!(a.sources[0].snippet.chars().count(), SNIPPET_CHARS + 3);
        assert!(a.explanation.contains("5 reliable source(s)"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_chars("short", 10), "short");
    }
}

//! # Reference Module
//!
//! Data side of the encyclopedia reference lookup.
//!
//! A reference is informational only. It is shown next to a verdict but
//! never changes it. The HTTP client in the app crate turns every failure
//! into [`LookupOutcome::Failed`], so callers always get a value back.

use crate::search::truncate_chars;
use crate::{ClaimStatus, ClaimVerification};
use serde::{Deserialize, Serialize};

/// Longest extract kept on a [`Reference`], before the ellipsis.
pub const EXTRACT_CHARS: usize = 400;

/// Longest extract quoted in a reference claim, before the ellipsis.
pub const CLAIM_EXTRACT_CHARS: usize = 200;

/// Confidence given to REFERENCE_FOUND claims.
pub const REFERENCE_CONFIDENCE: u8 = 70;

/// An encyclopedia summary for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    /// Summary text, at most [`EXTRACT_CHARS`] characters plus "...".
    pub extract: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Reference {
    /// Build a reference, truncating the extract.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        extract: &str,
        url: impl Into<String>,
        thumbnail: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            extract: truncate_chars(extract, EXTRACT_CHARS),
            url: url.into(),
            thumbnail,
        }
    }

    /// REFERENCE_FOUND claim about `entity` backed by this reference.
    #[must_use]
    pub fn to_claim(&self, entity: &str) -> ClaimVerification {
        let quoted = truncate_chars(&self.extract.to_lowercase(), CLAIM_EXTRACT_CHARS);
        ClaimVerification::new(
            format!("{} information", entity),
            ClaimStatus::ReferenceFound,
            REFERENCE_CONFIDENCE,
            format!("Wikipedia: {}", self.title),
            format!("Wikipedia reference: {}", quoted),
        )
        .with_url(self.url.clone())
    }
}

/// Outcome of one reference lookup.
///
/// "Not found" and "failed" are distinct so callers can log failures, but
/// both read as `found() == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found { reference: Reference },
    NotFound,
    Failed { reason: String },
}

impl LookupOutcome {
    #[must_use]
    pub fn found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[must_use]
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Self::Found { reference } => Some(reference),
            _ => None,
        }
    }

    /// Failure reason, if the lookup failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Page title to look up for free text, e.g. `Donald_Trump`.
///
/// Drops " is " and " the ", keeps capitalized words longer than one
/// character and joins the first two with underscores. `None` when the text
/// has no capitalized word.
#[must_use]
pub fn page_title_for(text: &str) -> Option<String> {
    let cleaned = text.replace(" is ", " ").replace(" the ", " ");
    let words: Vec<&str> = cleaned
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > 1 && w.chars().next().is_some_and(char::is_uppercase))
        .take(2)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(page_title(&words.join(" ")))
    }
}

/// Page title for an entity name: spaces become underscores.
#[must_use]
pub fn page_title(entity: &str) -> String {
    entity.trim().replace(' ', "_")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_leading_capitalized_words() {
        assert_eq!(
            page_title_for("Donald Trump is the president of America"),
            Some("Donald_Trump".to_string())
        );
    }

    #[test]
    fn title_takes_at_most_two_words() {
        assert_eq!(
            page_title_for("The Eiffel Tower stands in Paris"),
            Some("The_Eiffel".to_string())
        );
    }

    #[test]
    fn title_strips_punctuation() {
        assert_eq!(
            page_title_for("\"Obama,\" they said."),
            Some("Obama".to_string())
        );
    }

    #[test]
    fn lowercase_text_has_no_title() {
        assert_eq!(page_title_for("water boils at 100 degrees"), None);
        assert_eq!(page_title_for(""), None);
    }

    #[test]
    fn extract_is_truncated_with_ellipsis() {
        let long = "a".repeat(EXTRACT_CHARS + 50);
        let r = Reference::new("T", &long, "u", None);
        assert_eq!(r.extract.chars().count(), EXTRACT_CHARS + 3);
        assert!(r.extract.ends_with("..."));

        let short = Reference::new("T", "Short summary.", "u", None);
        assert_eq!(short.extract, "Short summary.");
    }

    #[test]
    fn reference_claim_is_not_decisive() {
        let r = Reference::new("Sun", "The Sun is the star at the center.", "https://w/Sun", None);
        let claim = r.to_claim("Sun");
        assert_eq!(claim.status, ClaimStatus::ReferenceFound);
        assert!(!claim.status.is_decisive());
        assert_eq!(claim.confidence, REFERENCE_CONFIDENCE);
        assert_eq!(claim.source, "Wikipedia: Sun");
        assert_eq!(claim.details, "Wikipedia reference: the sun is the star at the center.");
        assert_eq!(claim.url.as_deref(), Some("https://w/Sun"));
    }

    #[test]
    fn outcome_accessors() {
        let found = LookupOutcome::Found {
            reference: Reference::new("T", "e", "u", None),
        };
        assert!(found.found());
        assert!(found.reference().is_some());
        assert!(!LookupOutcome::NotFound.found());

        let failed = LookupOutcome::failed("timeout");
        assert!(!failed.found());
        assert_eq!(failed.error(), Some("timeout"));
    }
}

//! # factlens-core
//!
//! The deterministic analysis engine behind factlens.
//!
//! A piece of text is judged by two independent kinds of signal:
//! - a statistical classifier ([`classifier`]) that only sees word patterns
//! - rule-based fact checks ([`rules`]) and optional web evidence ([`search`])
//!
//! The [`combiner`] merges them into a single [`Verdict`] that always explains
//! which signal won. Everything in this crate is synchronous and free of I/O
//! except for reading model and rule files; network collaborators live in the
//! app crate and hand plain data back in.

pub mod classifier;
pub mod combiner;
pub mod entities;
pub mod formats;
pub mod reference;
pub mod report;
pub mod rules;
pub mod search;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use classifier::{Classifier, LinearTextModel, ModelError};
pub use combiner::{OVERRIDE_CONFIDENCE, Verdict, combine};
pub use entities::{Entities, extract_entities};
pub use reference::{LookupOutcome, Reference};
pub use report::AnalysisReport;
pub use rules::{Predicate, Rule, RuleError, RuleTable, match_claims};
pub use search::{SearchAssessment, SearchHit, TrustedSource, assess_results};

// =============================================================================
// LABEL
// =============================================================================

/// Binary news label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    /// Uppercase display form (`FAKE` / `REAL`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fake => "FAKE",
            Self::Real => "REAL",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label string is neither `fake` nor `real`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label '{0}', expected 'fake' or 'real'")]
pub struct ParseLabelError(pub String);

impl FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fake" => Ok(Self::Fake),
            "real" => Ok(Self::Real),
            _ => Err(ParseLabelError(s.to_string())),
        }
    }
}

// =============================================================================
// CLAIM VERIFICATION
// =============================================================================

/// Outcome of checking one claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    Verified,
    False,
    ReferenceFound,
    Uncertain,
    Unverifiable,
}

impl ClaimStatus {
    /// Wire/display form, e.g. `REFERENCE_FOUND`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::False => "FALSE",
            Self::ReferenceFound => "REFERENCE_FOUND",
            Self::Uncertain => "UNCERTAIN",
            Self::Unverifiable => "UNVERIFIABLE",
        }
    }

    /// Whether this status can override the classifier.
    #[must_use]
    pub fn is_decisive(&self) -> bool {
        matches!(self, Self::Verified | Self::False)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fact-checker's judgment about one claim found in the input text.
///
/// Built once by a rule, a web search assessment or a reference lookup and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerification {
    /// What was checked.
    pub claim: String,
    /// The judgment.
    pub status: ClaimStatus,
    /// Confidence from 0 to 100.
    pub confidence: u8,
    /// Provenance (display only).
    pub source: String,
    /// Human-readable explanation.
    pub details: String,
    /// Trusted web sources backing a web search judgment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<TrustedSource>,
    /// Link to the reference page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ClaimVerification {
    /// Create a claim record. Confidence is clamped to 100.
    #[must_use]
    pub fn new(
        claim: impl Into<String>,
        status: ClaimStatus,
        confidence: u8,
        source: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            status,
            confidence: confidence.min(100),
            source: source.into(),
            details: details.into(),
            sources: Vec::new(),
            url: None,
        }
    }

    /// Attach trusted web sources.
    #[must_use]
    pub fn with_sources(mut self, sources: Vec<TrustedSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Attach a reference URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

// =============================================================================
// CLASSIFIER RESULT
// =============================================================================

/// Output of the statistical classifier.
///
/// Built only through [`ClassifierResult::new`], so the confidence is
/// always in `[50, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierResult {
    label: Label,
    confidence: f64,
    method: String,
}

impl ClassifierResult {
    /// Create a classifier result. Confidence is clamped into `[50, 100]`.
    #[must_use]
    pub fn new(label: Label, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(50.0, 100.0),
            method: String::from(classifier::METHOD_NAME),
        }
    }

    /// Winning label.
    #[must_use]
    pub fn label(&self) -> Label {
        self.label
    }

    /// Winning-class probability in percent.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Display name of the method that produced the result.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }
}

// =============================================================================
// TESTS
// =============================================================================

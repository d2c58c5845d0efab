//! # Report Module
//!
//! Transparent, structured output for one analysis.
//!
//! Every verdict is shown together with:
//! - the classifier's own opinion and confidence
//! - every claim that was checked, with source and explanation
//! - the reference summary, if one was found
//! - whether fact checks overrode the classifier, and why

use crate::combiner::Verdict;
use crate::entities::Entities;
use crate::reference::LookupOutcome;
use crate::ClaimVerification;
use serde::Serialize;

/// Everything produced by analyzing one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// The analyzed text.
    pub text: String,
    /// Entities extracted from the text.
    pub entities: Entities,
    /// The combined verdict.
    pub verdict: Verdict,
    /// Reference lookup result; `None` when lookups are disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<LookupOutcome>,
}

impl AnalysisReport {
    /// Format as plain text with the standard template.
    #[must_use]
    pub fn to_text(&self) -> String {
        let verdict = &self.verdict;
        let ml = verdict.classifier_result();
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ STEP 1: ML PATTERN DETECTION       │\n");
        output.push_str(&format!(
            "│ - {} ({:.1}% confidence) [{}]\n",
            ml.label(),
            ml.confidence(),
            ml.method()
        ));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ STEP 2: FACT VERIFICATION          │\n");
        output.push_str(&claims_to_text(verdict.claims()));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ REFERENCE (display only)           │\n");
        match self.reference.as_ref().and_then(LookupOutcome::reference) {
            Some(reference) => {
                output.push_str(&format!("│ - {}\n", reference.title));
                output.push_str(&format!("│     {}\n", reference.extract));
                output.push_str(&format!("│     {}\n", reference.url));
            }
            None => output.push_str("│ - (none)                           │\n"),
        }

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ STEP 3: FINAL VERDICT              │\n");
        output.push_str(&format!(
            "│ - {} NEWS ({:.1}% confidence)\n",
            verdict.final_label(),
            verdict.final_confidence()
        ));
        match verdict.override_reason() {
            Some(reason) => {
                output.push_str(&format!("│ - Fact-check override: {}\n", reason));
                output.push_str(&format!(
                    "│   ML predicted {} ({:.1}%)\n",
                    ml.label(),
                    ml.confidence()
                ));
            }
            None => {
                output.push_str("│ - No factual claims were decisive; based on ML analysis\n");
            }
        }

        output.push_str("└─────────────────────────────────────┘\n");

        output
    }
}

/// Render a claim list, one entry per claim, or a "(none)" line.
#[must_use]
pub fn claims_to_text(claims: &[ClaimVerification]) -> String {
    if claims.is_empty() {
        return String::from("│ - (no verifiable factual claims)   │\n");
    }

    let mut output = String::new();
    for claim in claims {
        output.push_str(&format!(
            "│ - [{}] {} [{}% confidence]\n",
            claim.status, claim.claim, claim.confidence
        ));
        output.push_str(&format!("│     {}\n", claim.details));
        output.push_str(&format!("│     source: {}\n", claim.source));
        for source in &claim.sources {
            output.push_str(&format!(
                "│     - {} ({}, trust {})\n",
                source.title, source.url, source.trust_level
            ));
        }
    }
    output
}

// =============================================================================
// TESTS
// =============================================================================

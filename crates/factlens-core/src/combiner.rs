//! # Combiner Module
//!
//! Merges the classifier's judgment with rule-based claim verifications.
//!
//! Precedence, highest first:
//! - any VERIFIED claim: the text is REAL
//! - any FALSE claim: the text is FAKE
//! - otherwise the classifier's own label and confidence
//!
//! REFERENCE_FOUND, UNCERTAIN and UNVERIFIABLE claims are carried along for
//! display and never influence the outcome.

use crate::{ClaimStatus, ClaimVerification, ClassifierResult, Label};
use serde::Serialize;

/// Confidence assigned to a verdict decided by fact checks.
///
/// Fixed, and deliberately independent of the claims' own confidence fields.
pub const OVERRIDE_CONFIDENCE: f64 = 95.0;

/// The combined decision for one analyzed text.
///
/// Only [`combine`] builds a verdict, so `override_reason` is `Some`
/// exactly when `override_applied` is true. Fields are read through
/// accessors; a struct literal does not compile outside this module:
///
/// ```compile_fail
/// use factlens_core::{ClassifierResult, Label, Verdict};
///
/// let forged = Verdict {
///     final_label: Label::Real,
///     final_confidence: 95.0,
///     override_applied: true,
///     override_reason: None,
///     classifier_result: ClassifierResult::new(Label::Fake, 80.0),
///     claims: Vec::new(),
/// };
/// ```
///
/// `final_confidence` is a float percentage, not an integer: an override
/// serializes as `95.0`, and a fallback verdict passes the classifier's
/// confidence through unrounded (for example `63.25`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    final_label: Label,
    final_confidence: f64,
    override_applied: bool,
    override_reason: Option<String>,
    classifier_result: ClassifierResult,
    claims: Vec<ClaimVerification>,
}

impl Verdict {
    /// Final label.
    #[must_use]
    pub fn final_label(&self) -> Label {
        self.final_label
    }

    /// Final confidence in percent, in `[50, 100]`.
    #[must_use]
    pub fn final_confidence(&self) -> f64 {
        self.final_confidence
    }

    /// Whether fact checks superseded the classifier.
    #[must_use]
    pub fn override_applied(&self) -> bool {
        self.override_applied
    }

    /// Why the override happened; `None` for a fallback verdict.
    #[must_use]
    pub fn override_reason(&self) -> Option<&str> {
        self.override_reason.as_deref()
    }

    /// The classifier's own result, kept for display.
    #[must_use]
    pub fn classifier_result(&self) -> &ClassifierResult {
        &self.classifier_result
    }

    /// Every claim considered, in evaluation order.
    #[must_use]
    pub fn claims(&self) -> &[ClaimVerification] {
        &self.claims
    }

    /// Number of VERIFIED claims.
    #[must_use]
    pub fn verified_count(&self) -> usize {
        count_status(&self.claims, ClaimStatus::Verified)
    }

    /// Number of FALSE claims.
    #[must_use]
    pub fn false_count(&self) -> usize {
        count_status(&self.claims, ClaimStatus::False)
    }
}

fn count_status(claims: &[ClaimVerification], status: ClaimStatus) -> usize {
    claims.iter().filter(|c| c.status == status).count()
}

/// Combine a classifier result and claim verifications into a verdict.
///
/// Total and pure: every input produces a verdict, including an empty
/// claim list.
#[must_use]
pub fn combine(classifier_result: ClassifierResult, claims: Vec<ClaimVerification>) -> Verdict {
    let verified_count = count_status(&claims, ClaimStatus::Verified);
    let false_count = count_status(&claims, ClaimStatus::False);

    let (final_label, final_confidence, override_reason) = if verified_count > 0 {
        (
            Label::Real,
            OVERRIDE_CONFIDENCE,
            Some(format!(
                "{} fact(s) verified from trusted sources",
                verified_count
            )),
        )
    } else if false_count > 0 {
        (
            Label::Fake,
            OVERRIDE_CONFIDENCE,
            Some(format!("{} false claim(s) detected", false_count)),
        )
    } else {
        (
            classifier_result.label(),
            classifier_result.confidence(),
            None,
        )
    };

    Verdict {
        final_label,
        final_confidence,
        override_applied: override_reason.is_some(),
        override_reason,
        classifier_result,
        claims,
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Property tests for the combiner and the rule matcher.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use factlens_core::entities::extract_entities;
use factlens_core::{
    ClaimStatus, ClaimVerification, ClassifierResult, Label, OVERRIDE_CONFIDENCE, RuleTable,
    combine,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// STRATEGIES
// =============================================================================

fn status() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Verified),
        Just(ClaimStatus::False),
        Just(ClaimStatus::ReferenceFound),
        Just(ClaimStatus::Uncertain),
        Just(ClaimStatus::Unverifiable),
    ]
}

fn non_decisive_status() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::ReferenceFound),
        Just(ClaimStatus::Uncertain),
        Just(ClaimStatus::Unverifiable),
    ]
}

fn claim_with(status: impl Strategy<Value = ClaimStatus>) -> impl Strategy<Value = ClaimVerification> {
    (status, 0u8..=100, "[a-z ]{0,20}").prop_map(|(status, confidence, claim)| {
        ClaimVerification::new(claim, status, confidence, "prop", "generated")
    })
}

fn classifier_result() -> impl Strategy<Value = ClassifierResult> {
    (any::<bool>(), 50.0f64..=100.0).prop_map(|(real, confidence)| {
        let label = if real { Label::Real } else { Label::Fake };
        ClassifierResult::new(label, confidence)
    })
}

const FRAGMENTS: &[&str] = &[
    "Donald Trump",
    "Joe Biden",
    "Obama",
    "is the president",
    "of America",
    "of the United States",
    "the sun",
    "sets",
    "rises",
    "in the east",
    "in the west",
    "the earth is flat",
    "water boils",
    "at 100 degrees",
    "government announces a bill",
];

fn headline() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..7).prop_map(|parts| parts.join(" "))
}

// =============================================================================
// COMBINER PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn any_verified_claim_means_real(
        ml in classifier_result(),
        mut claims in prop::collection::vec(claim_with(status()), 0..8),
        verified in claim_with(Just(ClaimStatus::Verified)),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(claims.len() + 1);
        claims.insert(at, verified);
        let verdict = combine(ml, claims);

        prop_assert_eq!(verdict.final_label(), Label::Real);
        prop_assert!(verdict.override_applied());
        prop_assert_eq!(verdict.final_confidence(), OVERRIDE_CONFIDENCE);
    }

    #[test]
    fn without_decisive_claims_classifier_decides(
        ml in classifier_result(),
        claims in prop::collection::vec(claim_with(non_decisive_status()), 0..8),
    ) {
        let verdict = combine(ml.clone(), claims);

        prop_assert_eq!(verdict.final_label(), ml.label());
        prop_assert_eq!(verdict.final_confidence(), ml.confidence());
        prop_assert!(!verdict.override_applied());
        prop_assert!(verdict.override_reason().is_none());
    }

    #[test]
    fn false_without_verified_means_fake(
        ml in classifier_result(),
        mut claims in prop::collection::vec(claim_with(non_decisive_status()), 0..8),
        falses in prop::collection::vec(claim_with(Just(ClaimStatus::False)), 1..4),
    ) {
        let expected = format!("{} false claim(s) detected", falses.len());
        claims.extend(falses);
        let verdict = combine(ml, claims);

        prop_assert_eq!(verdict.final_label(), Label::Fake);
        prop_assert!(verdict.override_applied());
        prop_assert_eq!(verdict.final_confidence(), OVERRIDE_CONFIDENCE);
        prop_assert_eq!(verdict.override_reason(), Some(expected.as_str()));
    }

    #[test]
    fn override_flag_matches_reason_and_claims(
        ml in classifier_result(),
        claims in prop::collection::vec(claim_with(status()), 0..8),
    ) {
        let decisive = claims.iter().any(|c| c.status.is_decisive());
        let verdict = combine(ml, claims.clone());

        prop_assert_eq!(verdict.override_applied(), decisive);
        prop_assert_eq!(verdict.override_reason().is_some(), verdict.override_applied());
        prop_assert_eq!(verdict.claims(), claims.as_slice());
    }

    #[test]
    fn combine_is_deterministic(
        ml in classifier_result(),
        claims in prop::collection::vec(claim_with(status()), 0..8),
    ) {
        prop_assert_eq!(combine(ml.clone(), claims.clone()), combine(ml, claims));
    }
}

// =============================================================================
// MATCHER PROPERTIES
// =============================================================================

fn fired_ids(table: &RuleTable, text: &str) -> BTreeSet<String> {
    table
        .fired(text, &extract_entities(text))
        .into_iter()
        .map(|r| r.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn rule_order_does_not_change_which_rules_fire(
        text in headline(),
        shuffled in Just(RuleTable::builtin().rules().to_vec()).prop_shuffle(),
    ) {
        let builtin = RuleTable::builtin();
        let reordered = RuleTable::new(shuffled.clone()).unwrap();

        prop_assert_eq!(fired_ids(&builtin, &text), fired_ids(&reordered, &text));

        // Output follows the table's own order.
        let order: Vec<&str> = reordered
            .fired(&text, &extract_entities(&text))
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        let expected: Vec<&str> = shuffled
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| order.contains(id))
            .collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn matching_is_deterministic(text in headline()) {
        let table = RuleTable::builtin();
        prop_assert_eq!(table.match_text(&text), table.match_text(&text));
    }
}

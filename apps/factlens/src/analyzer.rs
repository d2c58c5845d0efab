//! # Analyzer
//!
//! Wires the core engine to its collaborators.
//!
//! The verdict path is: extract entities, classify, match rules, fall back
//! to web search and (optionally) reference claims, then combine. The
//! display-only reference lookup runs concurrently with that path and is
//! bounded by its own timeout; it never influences the verdict.

use crate::config::{AnalyzerConfig, ReferenceConfig};
use crate::error::AppError;
use crate::lookup::WikipediaClient;
use crate::search::WebSearch;
use factlens_core::{
    AnalysisReport, ClaimVerification, Classifier, Entities, LookupOutcome, RuleTable, combine,
    extract_entities, match_claims,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fact checks for one text, without a classifier opinion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub text: String,
    pub entities: Entities,
    pub claims: Vec<ClaimVerification>,
}

/// The full analysis pipeline.
pub struct Analyzer {
    classifier: Option<Arc<dyn Classifier>>,
    rules: RuleTable,
    reference: Option<WikipediaClient>,
    web_search: WebSearch,
    reference_claims: bool,
    display_lookup: bool,
    display_timeout: Duration,
}

impl Analyzer {
    pub fn new(
        config: &AnalyzerConfig,
        rules: RuleTable,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Result<Self, AppError> {
        let reference = match &config.reference {
            ReferenceConfig::Disabled => None,
            ReferenceConfig::Wikipedia { base_url, timeout } => {
                Some(WikipediaClient::new(base_url, *timeout)?)
            }
        };
        let web_search = WebSearch::from_config(&config.web_search)?;

        info!(
            rules = rules.len(),
            classifier = classifier.is_some(),
            reference = reference.is_some(),
            web_search = web_search.is_enabled(),
            "analyzer ready"
        );

        Ok(Self {
            classifier,
            rules,
            reference,
            web_search,
            reference_claims: config.reference_claims,
            display_lookup: config.display_lookup,
            display_timeout: config.display_timeout,
        })
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn web_search_enabled(&self) -> bool {
        self.web_search.is_enabled()
    }

    pub fn reference_enabled(&self) -> bool {
        self.reference.is_some()
    }

    /// Classify, check and combine. Requires a classifier.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisReport, AppError> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(AppError::ClassifierUnavailable)?;

        let verdict_path = async {
            let entities = extract_entities(text);
            let prediction = classifier.predict(text);
            debug!(
                label = %prediction.label(),
                confidence = prediction.confidence(),
                "classifier"
            );
            let claims = self.collect_claims(text, &entities).await;
            let verdict = combine(prediction, claims);
            (entities, verdict)
        };
        let ((entities, verdict), reference) = tokio::join!(verdict_path, self.display_reference(text));

        info!(
            label = %verdict.final_label(),
            confidence = verdict.final_confidence(),
            override_applied = verdict.override_applied(),
            claims = verdict.claims().len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            text: text.to_string(),
            entities,
            verdict,
            reference,
        })
    }

    /// Fact checks only: rules, then web search, then reference claims.
    pub async fn check(&self, text: &str) -> CheckReport {
        let entities = extract_entities(text);
        let claims = self.collect_claims(text, &entities).await;
        CheckReport {
            text: text.to_string(),
            entities,
            claims,
        }
    }

    /// Reference lookup for free text. `NotFound` when lookups are disabled.
    pub async fn lookup(&self, text: &str) -> LookupOutcome {
        match &self.reference {
            Some(client) => client.lookup(text).await,
            None => LookupOutcome::NotFound,
        }
    }

    async fn collect_claims(&self, text: &str, entities: &Entities) -> Vec<ClaimVerification> {
        let mut claims = match_claims(&self.rules, text, entities);
        if !claims.is_empty() {
            return claims;
        }

        if let Some(assessment) = self.web_search.verify(text).await {
            claims.extend(assessment.into_claim());
        }

        if claims.is_empty() && self.reference_claims {
            if let Some(client) = &self.reference {
                claims = client.reference_claims(entities).await;
            }
        }

        claims
    }

    async fn display_reference(&self, text: &str) -> Option<LookupOutcome> {
        if !self.display_lookup {
            return None;
        }
        let client = self.reference.as_ref()?;
        match tokio::time::timeout(self.display_timeout, client.lookup(text)).await {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                warn!(timeout = ?self.display_timeout, "reference lookup timed out");
                Some(LookupOutcome::failed("reference lookup timed out"))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use factlens_core::{ClaimStatus, ClassifierResult, Label};

    struct Always(Label);

    impl Classifier for Always {
        fn predict(&self, _text: &str) -> ClassifierResult {
            ClassifierResult::new(self.0, 80.0)
        }
    }

    fn offline(classifier: Option<Arc<dyn Classifier>>) -> Option<Analyzer> {
        Analyzer::new(&AnalyzerConfig::offline(), RuleTable::builtin(), classifier).ok()
    }

    #[tokio::test]
    async fn analyze_without_classifier_is_an_error() {
        let analyzer = offline(None);
        assert!(analyzer.is_some());
        if let Some(analyzer) = analyzer {
            assert!(matches!(
                analyzer.analyze("The earth is flat").await,
                Err(AppError::ClassifierUnavailable)
            ));
        }
    }

    #[tokio::test]
    async fn rule_hit_overrides_classifier() {
        if let Some(analyzer) = offline(Some(Arc::new(Always(Label::Real)))) {
            let report = analyzer.analyze("Scientists admit the earth is flat").await;
            assert!(report.is_ok());
            if let Ok(report) = report {
                assert_eq!(report.verdict.final_label(), Label::Fake);
                assert!(report.verdict.override_applied());
                assert_eq!(report.reference, None);
            }
        }
    }

    #[tokio::test]
    async fn check_runs_without_classifier() {
        if let Some(analyzer) = offline(None) {
            let report = analyzer.check("The sun rises in the east").await;
            assert_eq!(report.claims.len(), 1);
            assert_eq!(report.claims[0].status, ClaimStatus::Verified);
        }
    }

    #[tokio::test]
    async fn disabled_lookup_reports_not_found() {
        if let Some(analyzer) = offline(None) {
            assert_eq!(analyzer.lookup("Donald Trump").await, LookupOutcome::NotFound);
        }
    }
}

//! Brave web search client.
//!
//! Sends one query per claim and hands the hits to
//! [`factlens_core::assess_results`] for scoring. A failed search becomes an
//! UNVERIFIABLE assessment, which the analyzer then leaves out.

use crate::config::{USER_AGENT, WebSearchConfig};
use factlens_core::{SearchAssessment, SearchHit, assess_results};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Header carrying the Brave subscription token.
pub const TOKEN_HEADER: &str = "X-Subscription-Token";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned status {0}")]
    Status(StatusCode),

    #[error("malformed search response: {0}")]
    Malformed(String),
}

#[derive(Debug, Default, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Default, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Default, Deserialize)]
struct BraveResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    age: String,
}

impl From<BraveResult> for SearchHit {
    fn from(r: BraveResult) -> Self {
        SearchHit {
            title: r.title,
            description: r.description,
            url: r.url,
            age: r.age,
        }
    }
}

/// Query text sent for a claim.
#[must_use]
pub fn query_for(claim: &str) -> String {
    format!("\"{}\" fact check OR verify OR true OR false", claim.trim())
}

/// Client for the Brave web search API.
#[derive(Debug, Clone)]
pub struct BraveSearchClient {
    endpoint: String,
    api_key: String,
    max_results: usize,
    client: reqwest::Client,
}

impl BraveSearchClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        max_results: usize,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            max_results: max_results.max(1),
            client,
        })
    }

    /// Raw hits for a claim, at most `max_results` of them.
    pub async fn search(&self, claim: &str) -> Result<Vec<SearchHit>, SearchError> {
        let query = query_for(claim);
        debug!(query, "web search");

        let count = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header(TOKEN_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("q", query.as_str()), ("count", count.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        let parsed: BraveResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Malformed(e.to_string()))?;

        Ok(parsed
            .web
            .map(|w| w.results)
            .unwrap_or_default()
            .into_iter()
            .take(self.max_results)
            .map(SearchHit::from)
            .collect())
    }

    /// Search and score a claim. Never fails.
    pub async fn verify_claim(&self, claim: &str) -> SearchAssessment {
        match self.search(claim).await {
            Ok(hits) => {
                let assessment = assess_results(claim, &hits);
                info!(
                    status = %assessment.status,
                    confidence = assessment.confidence,
                    hits = hits.len(),
                    "web search assessed claim"
                );
                assessment
            }
            Err(e) => {
                warn!(error = %e, "web search failed");
                SearchAssessment::unverifiable(claim, format!("Could not search web: {e}"))
            }
        }
    }
}

/// Web search as configured: either off or a live client.
#[derive(Debug, Clone, Default)]
pub enum WebSearch {
    #[default]
    Disabled,
    Brave(BraveSearchClient),
}

impl WebSearch {
    pub fn from_config(config: &WebSearchConfig) -> Result<Self, SearchError> {
        Ok(match config {
            WebSearchConfig::Disabled => Self::Disabled,
            WebSearchConfig::Brave {
                api_key,
                endpoint,
                max_results,
                timeout,
            } => Self::Brave(BraveSearchClient::new(
                api_key.as_str(),
                endpoint.as_str(),
                *max_results,
                *timeout,
            )?),
        })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Brave(_))
    }

    /// Assessment for a claim, or `None` when search is disabled.
    pub async fn verify(&self, claim: &str) -> Option<SearchAssessment> {
        match self {
            Self::Disabled => None,
            Self::Brave(client) => Some(client.verify_claim(claim).await),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Wikipedia summary client.
//!
//! Fetches `{base}/page/summary/{title}` and turns the response into a
//! [`Reference`]. Every failure is folded into a [`LookupOutcome`] so callers
//! never see a transport error.

use crate::config::USER_AGENT;
use factlens_core::reference::{page_title, page_title_for};
use factlens_core::{ClaimVerification, Entities, LookupOutcome, Reference};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Entities looked up when building reference claims.
pub const MAX_REFERENCE_ENTITIES: usize = 2;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    BaseUrl(String),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed summary: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    #[serde(default)]
    desktop: Option<PageUrls>,
}

#[derive(Debug, Deserialize)]
struct PageUrls {
    #[serde(default)]
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    source: Option<String>,
}

impl SummaryBody {
    fn into_reference(self) -> Reference {
        let url = self
            .content_urls
            .and_then(|c| c.desktop)
            .and_then(|d| d.page)
            .unwrap_or_default();
        let thumbnail = self.thumbnail.and_then(|t| t.source);
        Reference::new(self.title, &self.extract, url, thumbnail)
    }
}

/// Client for the Wikipedia REST summary endpoint.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    base_url: Url,
    client: reqwest::Client,
}

impl WikipediaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url =
            Url::parse(base_url).map_err(|e| LookupError::BaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::BaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { base_url, client })
    }

    fn summary_url(&self, title: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| LookupError::BaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["page", "summary", title]);
        }
        Ok(url)
    }

    /// Fetch one page summary. `Ok(None)` when the page does not exist.
    pub async fn summary(&self, title: &str) -> Result<Option<Reference>, LookupError> {
        let url = self.summary_url(title)?;
        debug!(%url, "fetching page summary");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body = response.text().await?;
        let summary: SummaryBody =
            serde_json::from_str(&body).map_err(|e| LookupError::Malformed(e.to_string()))?;
        Ok(Some(summary.into_reference()))
    }

    /// Look up the page for an entity name.
    pub async fn lookup_entity(&self, entity: &str) -> LookupOutcome {
        self.lookup_title(&page_title(entity)).await
    }

    /// Look up the page implied by free text.
    pub async fn lookup(&self, text: &str) -> LookupOutcome {
        match page_title_for(text) {
            Some(title) => self.lookup_title(&title).await,
            None => LookupOutcome::NotFound,
        }
    }

    async fn lookup_title(&self, title: &str) -> LookupOutcome {
        if title.is_empty() {
            return LookupOutcome::NotFound;
        }
        match self.summary(title).await {
            Ok(Some(reference)) => LookupOutcome::Found { reference },
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                warn!(title, error = %e, "reference lookup failed");
                LookupOutcome::failed(e.to_string())
            }
        }
    }

    /// REFERENCE_FOUND claims for the first capitalized candidates that have
    /// a page with a non-empty summary. Known people found only in lowercase
    /// text are not looked up.
    pub async fn reference_claims(&self, entities: &Entities) -> Vec<ClaimVerification> {
        let mut claims = Vec::new();
        for entity in entities.candidates.iter().take(MAX_REFERENCE_ENTITIES) {
            if let LookupOutcome::Found { reference } = self.lookup_entity(entity).await {
                if !reference.extract.is_empty() {
                    claims.push(reference.to_claim(entity));
                }
            }
        }
        claims
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_url_appends_encoded_title() {
        let client = WikipediaClient::new("https://en.wikipedia.org/api/rest_v1/", Duration::from_secs(1));
        assert!(client.is_ok());
        if let Ok(client) = client {
            let url = client.summary_url("Xi_Jinping").map(|u| u.to_string());
            assert_eq!(
                url.ok().as_deref(),
                Some("https://en.wikipedia.org/api/rest_v1/page/summary/Xi_Jinping")
            );
            let odd = client.summary_url("AC/DC").map(|u| u.to_string());
            assert_eq!(
                odd.ok().as_deref(),
                Some("https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC")
            );
        }
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(matches!(
            WikipediaClient::new("not a url", Duration::from_secs(1)),
            Err(LookupError::BaseUrl(_))
        ));
        assert!(matches!(
            WikipediaClient::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(LookupError::BaseUrl(_))
        ));
    }

    #[test]
    fn summary_body_without_urls_still_converts() {
        let body: Result<SummaryBody, _> =
            serde_json::from_str(r#"{"title":"Sun","extract":"The Sun is a star."}"#);
        assert!(body.is_ok());
        if let Ok(body) = body {
            let reference = body.into_reference();
            assert_eq!(reference.title, "Sun");
            assert_eq!(reference.url, "");
            assert_eq!(reference.thumbnail, None);
        }
    }
}

//! Runtime configuration.
//!
//! Built once at startup from CLI flags and environment variables and passed
//! explicitly into the analyzer and the server. Optional collaborators carry
//! an explicit `Disabled` state instead of an absent key.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Wikipedia REST API root.
pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1";

/// Brave web search endpoint.
pub const DEFAULT_BRAVE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// User-Agent sent to every external service.
pub const USER_AGENT: &str = concat!(
    "factlens/",
    env!("CARGO_PKG_VERSION"),
    " (fact-checking demo)"
);

/// Per-request timeout for reference lookups.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-request timeout for web searches.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on the display-only lookup running beside the verdict path.
pub const DISPLAY_LOOKUP_TIMEOUT: Duration = Duration::from_secs(6);

/// Search results requested per claim.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Largest accepted input text, in bytes.
pub const MAX_TEXT_BYTES: usize = 65_536;

/// Encyclopedia reference lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceConfig {
    Disabled,
    Wikipedia { base_url: String, timeout: Duration },
}

impl ReferenceConfig {
    /// Wikipedia at `base_url` with the default timeout.
    pub fn wikipedia(base_url: impl Into<String>) -> Self {
        Self::Wikipedia {
            base_url: base_url.into(),
            timeout: LOOKUP_TIMEOUT,
        }
    }
}

/// Third-party web search.
#[derive(Clone, PartialEq, Eq)]
pub enum WebSearchConfig {
    Disabled,
    Brave {
        api_key: String,
        endpoint: String,
        max_results: usize,
        timeout: Duration,
    },
}

impl WebSearchConfig {
    /// Brave search when a non-blank key is given, otherwise `Disabled`.
    pub fn from_api_key(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        match api_key.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => Self::Brave {
                api_key: key,
                endpoint: endpoint.into(),
                max_results: DEFAULT_MAX_RESULTS,
                timeout: SEARCH_TIMEOUT,
            },
            _ => Self::Disabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Brave {
                endpoint,
                max_results,
                timeout,
                ..
            } => f
                .debug_struct("Brave")
                .field("api_key", &"<redacted>")
                .field("endpoint", endpoint)
                .field("max_results", max_results)
                .field("timeout", timeout)
                .finish(),
        }
    }
}

/// Everything the analyzer needs besides the classifier and rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub reference: ReferenceConfig,
    pub web_search: WebSearchConfig,
    /// Turn encyclopedia hits into REFERENCE_FOUND claims when no rule fired.
    pub reference_claims: bool,
    /// Run the display-only lookup beside the verdict path.
    pub display_lookup: bool,
    pub display_timeout: Duration,
}

impl AnalyzerConfig {
    /// No network collaborators at all.
    pub fn offline() -> Self {
        Self {
            reference: ReferenceConfig::Disabled,
            web_search: WebSearchConfig::Disabled,
            reference_claims: false,
            display_lookup: false,
            display_timeout: DISPLAY_LOOKUP_TIMEOUT,
        }
    }

    /// Wikipedia lookups on, web search per `web_search`.
    pub fn online(wikipedia_url: impl Into<String>, web_search: WebSearchConfig) -> Self {
        Self {
            reference: ReferenceConfig::wikipedia(wikipedia_url),
            web_search,
            reference_claims: false,
            display_lookup: true,
            display_timeout: DISPLAY_LOOKUP_TIMEOUT,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::offline()
    }
}

/// HTTP server settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Bearer token required on every route but `/health`.
    pub api_key: Option<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

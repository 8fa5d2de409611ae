//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the API endpoint, page sizes, the short-query
//! guard and request timeouts. The defaults mirror the public GitHub API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Public GitHub REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Hard upper bound the GitHub search API accepts for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Configuration for the filtered search engine and the GitHub client.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour. Missing fields fall back to
/// defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Root of the GitHub REST API. Overridable for GitHub Enterprise or tests.
    pub api_base_url: String,
    /// Page size requested from the API when facets are selected.
    pub per_page: u32,
    /// Page size requested for each branch of the no-facet fallback search.
    pub fallback_per_page: u32,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Queries shorter than this (in characters, after trimming) are not sent.
    pub min_query_len: usize,
    /// Custom User-Agent. GitHub rejects requests without one, so `None`
    /// falls back to [`default_user_agent`].
    pub user_agent: Option<String>,
    /// Number of recent repositories fetched for a profile.
    pub profile_repo_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            per_page: 50,
            fallback_per_page: 40,
            timeout_seconds: 10,
            min_query_len: 2,
            user_agent: None,
            profile_repo_limit: 10,
        }
    }
}

/// User-Agent sent when none is configured.
pub fn default_user_agent() -> String {
    format!("ghfinder/{}", env!("CARGO_PKG_VERSION"))
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `per_page` and `fallback_per_page` must be in `1..=100`
    /// - `timeout_seconds` must be greater than 0
    /// - `profile_repo_limit` must be in `1..=100`
    /// - `api_base_url` must be an absolute `http`/`https` URL
    pub fn validate(&self) -> Result<(), SearchError> {
        check_page_size("per_page", self.per_page)?;
        check_page_size("fallback_per_page", self.fallback_per_page)?;
        check_page_size("profile_repo_limit", self.profile_repo_limit)?;
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        self.base_url().map(|_| ())
    }

    /// Parsed [`SearchConfig::api_base_url`].
    pub fn base_url(&self) -> Result<Url, SearchError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| SearchError::Config(format!("api_base_url is not a valid URL: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SearchError::Config(format!(
                "api_base_url must use http or https, got `{other}`"
            ))),
        }
    }

    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Effective User-Agent header value.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(default_user_agent)
    }
}

fn check_page_size(field: &str, value: u32) -> Result<(), SearchError> {
    if value == 0 || value > MAX_PER_PAGE {
        return Err(SearchError::Config(format!(
            "{field} must be between 1 and {MAX_PER_PAGE}"
        )));
    }
    Ok(())
}

//! Shared HTTP client for GitHub API requests.
//!
//! Provides a configured [`reqwest::Client`] with the headers GitHub expects
//! and the per-request timeout from [`SearchConfig`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Media type GitHub recommends for REST v3 JSON responses.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// REST API version pinned on every request.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Build a [`reqwest::Client`] configured for the GitHub REST API.
///
/// The client has:
/// - Timeout from config
/// - Configured or default User-Agent (GitHub rejects anonymous agents)
/// - `Accept` and `X-GitHub-Api-Version` default headers
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.effective_user_agent())
        .default_headers(default_headers())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    headers
}

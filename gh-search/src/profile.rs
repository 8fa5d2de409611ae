//! Profile detail lookup: a single account plus its recent repositories.
//!
//! Unlike [`crate::search`], these are point lookups with no partial-failure
//! semantics, so errors propagate to the caller.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Longest login GitHub allows.
const MAX_LOGIN_LEN: usize = 39;

/// Full account attributes from `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub location: Option<String>,
    pub twitter_username: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub hireable: Option<bool>,
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }

    /// Blog link with a scheme, as GitHub stores it without one.
    pub fn blog_url(&self) -> Option<String> {
        let blog = self.blog.as_deref()?.trim();
        if blog.is_empty() {
            None
        } else if blog.starts_with("http://") || blog.starts_with("https://") {
            Some(blog.to_string())
        } else {
            Some(format!("https://{blog}"))
        }
    }
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

/// Point lookups backing the profile view.
pub trait ProfileLookup: Send + Sync {
    /// Fetch full profile attributes for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] for a malformed username, or an
    /// HTTP/status/parse error from the API.
    fn get_profile(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<UserProfile, SearchError>> + Send;

    /// Fetch up to `limit` most recently created repositories of `username`.
    ///
    /// # Errors
    ///
    /// Same as [`ProfileLookup::get_profile`].
    fn get_repos(
        &self,
        username: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RepoSummary>, SearchError>> + Send;
}

/// Validate and trim a GitHub login before it is placed in a URL path.
///
/// Accepts ASCII alphanumerics and `-`, up to 39 characters.
pub fn validate_username(username: &str) -> Result<&str, SearchError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidInput("username is empty".into()));
    }
    if trimmed.len() > MAX_LOGIN_LEN {
        return Err(SearchError::InvalidInput(format!(
            "username longer than {MAX_LOGIN_LEN} characters"
        )));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(SearchError::InvalidInput(
            "username may only contain letters, digits and `-`".into(),
        ));
    }
    Ok(trimmed)
}

//! GitHub REST API backend.
//!
//! Implements [`SearchBackend`] over `/search/users` and
//! `/search/repositories`, and [`ProfileLookup`] over `/users/{login}` and
//! `/users/{login}/repos`. Search payloads are decoded leniently: a body
//! without an `items` array yields no hits, and individual items that do not
//! decode are skipped.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::backend::SearchBackend;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::orchestrator::query::BackendQuery;
use crate::profile::{validate_username, ProfileLookup, RepoSummary, UserProfile};
use crate::types::{EntityKind, Owner, RepoResult, ResultItem, UserResult};

/// Client for the public (unauthenticated) GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.base_url()?,
        })
    }

    /// Append `segments` to the API root, keeping any path prefix it has.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SearchError::Config("api_base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, SearchError> {
        tracing::trace!(%url, "GitHub request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest(context, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                message: context.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::from_reqwest(context, &e))
    }
}

impl SearchBackend for GitHubClient {
    async fn search(&self, query: &BackendQuery) -> Result<Vec<ResultItem>, SearchError> {
        let mut url = self.endpoint(&["search", query.kind.search_path()])?;
        url.query_pairs_mut()
            .append_pair("q", &query.q)
            .append_pair("per_page", &query.per_page.to_string());

        let context = format!("{} search", query.kind);
        let body: Value = self.get_json(url, &context).await?;
        let items = decode_items(query.kind, &body);
        tracing::debug!(kind = %query.kind, count = items.len(), "GitHub search decoded");
        Ok(items)
    }
}

impl ProfileLookup for GitHubClient {
    async fn get_profile(&self, username: &str) -> Result<UserProfile, SearchError> {
        let login = validate_username(username)?;
        let url = self.endpoint(&["users", login])?;
        self.get_json(url, "profile lookup").await
    }

    async fn get_repos(&self, username: &str, limit: u32) -> Result<Vec<RepoSummary>, SearchError> {
        let login = validate_username(username)?;
        let mut url = self.endpoint(&["users", login, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "created")
            .append_pair("per_page", &limit.clamp(1, 100).to_string());
        self.get_json(url, "repository listing").await
    }
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: u64,
    login: String,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct WireRepo {
    id: u64,
    name: String,
    #[serde(default)]
    full_name: String,
    owner: Option<Owner>,
    #[serde(default)]
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
}

/// Decode the `items` array of a search response into untagged results.
///
/// A missing or non-array `items` field yields an empty list.
pub fn decode_items(kind: EntityKind, body: &Value) -> Vec<ResultItem> {
    let Some(items) = body.get("items").and_then(Value::as_array) else {
        tracing::warn!(%kind, "search response has no items array");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|raw| {
            let decoded = match kind {
                EntityKind::User => decode_user(raw),
                EntityKind::Repository => decode_repo(raw),
            };
            if let Err(ref e) = decoded {
                tracing::debug!(%kind, error = %e, "skipping undecodable search item");
            }
            decoded.ok()
        })
        .collect()
}

fn decode_user(raw: &Value) -> Result<ResultItem, serde_json::Error> {
    let wire = WireUser::deserialize(raw)?;
    Ok(ResultItem::User(UserResult {
        id: wire.id,
        login: wire.login,
        avatar_url: wire.avatar_url,
        html_url: wire.html_url,
        matched_by: Vec::new(),
        raw: raw.clone(),
    }))
}

fn decode_repo(raw: &Value) -> Result<ResultItem, serde_json::Error> {
    let wire = WireRepo::deserialize(raw)?;
    let owner = wire.owner.unwrap_or_default();
    let full_name = if wire.full_name.is_empty() && !owner.login.is_empty() {
        format!("{}/{}", owner.login, wire.name)
    } else {
        wire.full_name
    };
    Ok(ResultItem::Repo(RepoResult {
        id: wire.id,
        full_name,
        name: wire.name,
        owner,
        html_url: wire.html_url,
        description: wire.description,
        language: wire.language,
        stargazers_count: wire.stargazers_count,
        matched_by: Vec::new(),
        raw: raw.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> GitHubClient {
        GitHubClient::new(&SearchConfig {
            api_base_url: base.into(),
            ..Default::default()
        })
        .expect("valid config")
    }

    #[test]
    fn decodes_user_items() {
        let body = json!({
            "total_count": 1,
            "items": [{
                "login": "torvalds",
                "id": 1024025,
                "avatar_url": "https://avatars.githubusercontent.com/u/1024025?v=4",
                "html_url": "https://github.com/torvalds",
                "type": "User"
            }]
        });
        let items = decode_items(EntityKind::User, &body);
        assert_eq!(items.len(), 1);
        let ResultItem::User(ref user) = items[0] else {
            panic!("expected a user");
        };
        assert_eq!(user.login, "torvalds");
        assert!(user.matched_by.is_empty());
        assert_eq!(user.raw["type"], "User");
    }

    #[test]
    fn decodes_repo_items() {
        let body = json!({
            "items": [{
                "id": 2325298,
                "name": "linux",
                "full_name": "torvalds/linux",
                "owner": { "login": "torvalds", "avatar_url": "https://a.example/t.png" },
                "html_url": "https://github.com/torvalds/linux",
                "description": "Linux kernel source tree",
                "language": "C",
                "stargazers_count": 190000
            }]
        });
        let items = decode_items(EntityKind::Repository, &body);
        let ResultItem::Repo(ref repo) = items[0] else {
            panic!("expected a repo");
        };
        assert_eq!(repo.full_name, "torvalds/linux");
        assert_eq!(repo.owner.login, "torvalds");
        assert_eq!(repo.language.as_deref(), Some("C"));
        assert_eq!(repo.stargazers_count, 190000);
    }

    #[test]
    fn missing_items_array_yields_nothing() {
        let body = json!({ "message": "API rate limit exceeded" });
        assert!(decode_items(EntityKind::User, &body).is_empty());
        assert!(decode_items(EntityKind::User, &json!({ "items": null })).is_empty());
    }

    #[test]
    fn undecodable_items_are_skipped() {
        let body = json!({
            "items": [
                { "login": "no-id" },
                { "login": "ok", "id": 2 }
            ]
        });
        let items = decode_items(EntityKind::User, &body);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), 2);
    }

    #[test]
    fn repo_without_full_name_is_rebuilt_from_owner() {
        let body = json!({
            "items": [{ "id": 3, "name": "tokio", "owner": { "login": "tokio-rs" } }]
        });
        let items = decode_items(EntityKind::Repository, &body);
        assert_eq!(items[0].title(), "tokio-rs/tokio");
        assert_eq!(items[0].avatar_url(), "");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = client("https://ghe.example.com/api/v3/")
            .endpoint(&["search", "users"])
            .expect("endpoint");
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/search/users");
    }

    #[test]
    fn endpoint_on_bare_host() {
        let url = client("https://api.github.com")
            .endpoint(&["users", "octocat", "repos"])
            .expect("endpoint");
        assert_eq!(url.as_str(), "https://api.github.com/users/octocat/repos");
    }

    #[test]
    fn invalid_config_rejected() {
        let result = GitHubClient::new(&SearchConfig {
            per_page: 0,
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_username_never_hits_network() {
        let client = client("http://127.0.0.1:9");
        let err = client.get_profile("../etc").await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }
}

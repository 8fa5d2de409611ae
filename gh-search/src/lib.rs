//! # gh-search
//!
//! Filtered search over GitHub users and repositories.
//!
//! Given a free-text query and a set of facets from a fixed catalog, this
//! crate builds one or two GitHub search queries, runs them concurrently,
//! merges and deduplicates the hits, and returns them users-first in the
//! API's relevance order. Results carry the labels of the facets they were
//! requested under, from which a match percentage is derived.
//!
//! ## Design
//!
//! - Facets targeting users and repositories are split into separate requests
//! - No facets at all falls back to a broad search of both entity types
//! - Each request has its own timeout; a failing request contributes nothing
//!   but never suppresses the other one
//! - Queries shorter than two characters are never sent
//! - Pagination is a pure slice over the merged set
//!
//! ## Security
//!
//! - Unauthenticated: no tokens to leak
//! - Query text is logged only at trace level
//! - Usernames are validated before being placed in a URL path

pub mod backend;
pub mod config;
pub mod error;
pub mod github;
pub mod http;
pub mod orchestrator;
pub mod pagination;
pub mod profile;
pub mod types;

pub use backend::SearchBackend;
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use github::GitHubClient;
pub use orchestrator::scoring::{item_match_score, match_score};
pub use orchestrator::search::{BranchFailure, SearchOutcome};
pub use pagination::{paginate, Page};
pub use profile::{ProfileLookup, RepoSummary, UserProfile};
pub use types::{
    catalog, parse_filters, EntityKind, FilterKey, ResultItem, SearchFilter, SelectedFilterSet,
};

/// Search GitHub through `backend`.
///
/// Never fails: rejected input yields an empty outcome and failed requests
/// are reported in [`SearchOutcome::failures`].
pub async fn search_with<B: SearchBackend>(
    backend: &B,
    query: &str,
    filters: &SelectedFilterSet,
    config: &SearchConfig,
) -> SearchOutcome {
    orchestrator::search::orchestrate_search(backend, query, filters, config).await
}

/// Search GitHub users and repositories over the public API.
///
/// Builds a [`GitHubClient`] from `config` and delegates to [`search_with`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Upstream failures
/// are not errors; see [`SearchOutcome::failures`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> gh_search::Result<()> {
/// let filters = gh_search::parse_filters(["username"])?;
/// let outcome = gh_search::search("torvalds", &filters, &Default::default()).await?;
/// for item in &outcome.items {
///     println!("{} ({}%)", item.title(), gh_search::item_match_score(item, &filters));
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    filters: &SelectedFilterSet,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    let client = GitHubClient::new(config)?;
    Ok(search_with(&client, query, filters, config).await)
}

/// Fetch a profile and its most recent repositories concurrently.
///
/// # Errors
///
/// Returns the first error of either lookup.
pub async fn fetch_profile<P: ProfileLookup>(
    lookup: &P,
    username: &str,
    repo_limit: u32,
) -> Result<(UserProfile, Vec<RepoSummary>)> {
    let (profile, repos) = futures::join!(
        lookup.get_profile(username),
        lookup.get_repos(username, repo_limit)
    );
    Ok((profile?, repos?))
}

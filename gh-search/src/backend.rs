//! Trait definition for pluggable search backends.
//!
//! The orchestrator never talks to HTTP directly: it hands a fully built
//! [`BackendQuery`] to a [`SearchBackend`] and receives normalized
//! [`ResultItem`]s back. [`crate::github::GitHubClient`] is the production
//! implementation; tests substitute in-memory backends.

use crate::error::SearchError;
use crate::orchestrator::query::BackendQuery;
use crate::types::ResultItem;

/// A source of GitHub search hits.
///
/// Implementors handle:
///
/// - Endpoint selection from [`BackendQuery::kind`]
/// - Query encoding
/// - Decoding the response into [`ResultItem`]s with an empty `matched_by`
///
/// A response without an `items` array decodes to an empty list rather than
/// an error. All implementations must be `Send + Sync` so both branches of a
/// search can run concurrently.
pub trait SearchBackend: Send + Sync {
    /// Execute one upstream search request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, times out, or the API
    /// answers with a non-success status.
    fn search(
        &self,
        query: &BackendQuery,
    ) -> impl std::future::Future<Output = Result<Vec<ResultItem>, SearchError>> + Send;
}
